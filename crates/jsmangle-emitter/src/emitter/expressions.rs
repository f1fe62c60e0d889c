use super::Printer;
use jsmangle_parser::{ClassData, MethodKind, NodeArena, NodeData, NodeIndex, PropertyKey, PropertyKind};

impl<'a> Printer<'a> {
    // =========================================================================
    // Expressions and patterns
    // =========================================================================

    pub(super) fn emit_expression(&mut self, data: &NodeData) {
        match data {
            NodeData::Identifier { name } => self.write(name),
            NodeData::NumericLiteral { raw } | NodeData::StringLiteral { raw } => self.write(raw),
            NodeData::BooleanLiteral { value } => self.write(if *value { "true" } else { "false" }),
            NodeData::NullLiteral => self.write("null"),
            NodeData::ThisExpression => self.write("this"),
            NodeData::ArrayExpression { elements } | NodeData::ArrayPattern { elements } => {
                self.emit_array_elements(elements);
            }
            NodeData::ObjectExpression { properties } | NodeData::ObjectPattern { properties } => {
                if properties.is_empty() {
                    self.write("{}");
                } else {
                    self.write("{ ");
                    self.emit_comma_list(properties);
                    self.write(" }");
                }
            }
            NodeData::Property {
                key,
                value,
                shorthand,
                kind,
            } => self.emit_property(key, *value, *shorthand, *kind),
            NodeData::FunctionExpression(func) => {
                self.write("function ");
                if func.id.is_some() {
                    self.emit(func.id);
                }
                self.emit_function_rest(&func.params, func.body);
            }
            NodeData::ArrowFunctionExpression { params, body, .. } => {
                self.write("(");
                self.emit_comma_list(params);
                self.write(") => ");
                self.emit(*body);
            }
            NodeData::ClassExpression(class) => self.emit_class(class),
            NodeData::ClassMethod {
                key,
                kind,
                is_static,
                value,
            } => {
                if *is_static {
                    self.write("static ");
                }
                match kind {
                    MethodKind::Get => self.write("get "),
                    MethodKind::Set => self.write("set "),
                    MethodKind::Method => {}
                }
                self.emit_property_key(key);
                self.emit_method_value(*value);
            }
            NodeData::MemberExpression {
                object,
                property,
                optional,
            } => {
                self.emit(*object);
                self.write(if *optional { "?." } else { "." });
                self.write(property);
            }
            NodeData::ComputedMemberExpression {
                object,
                property,
                optional,
            } => {
                self.emit(*object);
                self.write(if *optional { "?.[" } else { "[" });
                self.emit(*property);
                self.write("]");
            }
            NodeData::CallExpression {
                callee,
                arguments,
                optional,
            } => {
                self.emit(*callee);
                self.write(if *optional { "?.(" } else { "(" });
                self.emit_comma_list(arguments);
                self.write(")");
            }
            NodeData::NewExpression { callee, arguments } => {
                self.write("new ");
                self.emit(*callee);
                self.write("(");
                self.emit_comma_list(arguments);
                self.write(")");
            }
            NodeData::UnaryExpression { operator, argument } => {
                self.write(operator);
                if needs_space_after_unary(self.arena, operator, *argument) {
                    self.write_space();
                }
                self.emit(*argument);
            }
            NodeData::UpdateExpression {
                operator,
                prefix,
                argument,
            } => {
                if *prefix {
                    self.write(operator);
                    self.emit(*argument);
                } else {
                    self.emit(*argument);
                    self.write(operator);
                }
            }
            NodeData::BinaryExpression {
                operator,
                left,
                right,
            }
            | NodeData::AssignmentExpression {
                operator,
                left,
                right,
            } => {
                self.emit(*left);
                self.write_space();
                self.write(operator);
                self.write_space();
                self.emit(*right);
            }
            NodeData::AssignmentPattern { left, right } => {
                self.emit(*left);
                self.write(" = ");
                self.emit(*right);
            }
            NodeData::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                self.emit(*test);
                self.write(" ? ");
                self.emit(*consequent);
                self.write(" : ");
                self.emit(*alternate);
            }
            NodeData::SequenceExpression { expressions } => self.emit_comma_list(expressions),
            NodeData::ParenthesizedExpression { expression } => {
                self.write("(");
                self.emit(*expression);
                self.write(")");
            }
            NodeData::SpreadElement { argument } | NodeData::RestElement { argument } => {
                self.write("...");
                self.emit(*argument);
            }
            _ => {}
        }
    }

    pub(super) fn emit_class(&mut self, class: &ClassData) {
        self.write("class ");
        if class.id.is_some() {
            self.emit(class.id);
            self.write_space();
        }
        if class.super_class.is_some() {
            self.write("extends ");
            self.emit(class.super_class);
            self.write_space();
        }
        if class.members.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        for &member in &class.members {
            self.write_space();
            self.emit(member);
        }
        self.write(" }");
    }

    /// Holes print as empty slots; a trailing hole keeps its comma.
    fn emit_array_elements(&mut self, elements: &[NodeIndex]) {
        self.write("[");
        for (position, &element) in elements.iter().enumerate() {
            if position > 0 {
                self.write(",");
                if element.is_some() {
                    self.write_space();
                }
            }
            self.emit(element);
        }
        if elements.last().is_some_and(|last| last.is_none()) {
            self.write(",");
        }
        self.write("]");
    }

    fn emit_property(
        &mut self,
        key: &PropertyKey,
        value: NodeIndex,
        shorthand: bool,
        kind: PropertyKind,
    ) {
        match kind {
            PropertyKind::Method => {
                self.emit_property_key(key);
                self.emit_method_value(value);
                return;
            }
            PropertyKind::Get | PropertyKind::Set => {
                self.write(if kind == PropertyKind::Get { "get " } else { "set " });
                self.emit_property_key(key);
                self.emit_method_value(value);
                return;
            }
            PropertyKind::Init => {}
        }

        // Shorthand survives only while the key still matches the name the
        // value binds or reads.
        if shorthand && let Some(key_name) = NodeArena::property_key_name(key) {
            let (target, default) = match self.arena.data(value) {
                Some(NodeData::AssignmentPattern { left, right })
                | Some(NodeData::AssignmentExpression { left, right, .. }) => (*left, *right),
                _ => (value, NodeIndex::NONE),
            };
            if self.arena.identifier_name(target) == Some(key_name) {
                self.emit(target);
                if default.is_some() {
                    self.write(" = ");
                    self.emit(default);
                }
                return;
            }
        }

        self.emit_property_key(key);
        self.write(": ");
        self.emit(value);
    }

    /// `(params) body` of a method's function value.
    fn emit_method_value(&mut self, value: NodeIndex) {
        if let Some(NodeData::FunctionExpression(func)) = self.arena.data(value) {
            self.emit_function_rest(&func.params, func.body);
        }
    }
}

/// Whether `-` / `+` / a word operator must be separated from its operand.
fn needs_space_after_unary(arena: &NodeArena, operator: &str, argument: NodeIndex) -> bool {
    if operator.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return true;
    }
    let argument_operator = match arena.data(argument) {
        Some(NodeData::UnaryExpression { operator, .. }) => operator.as_str(),
        Some(NodeData::UpdateExpression {
            operator,
            prefix: true,
            ..
        }) => operator.as_str(),
        _ => return false,
    };
    matches!(operator, "-" | "+") && argument_operator.starts_with(operator)
}
