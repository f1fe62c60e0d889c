//! Parser state - expression parsing methods

use super::ParseError;
use super::state::ParserState;
use crate::base::NodeIndex;
use crate::node::{FunctionData, NodeData, PropertyKey, PropertyKind};
use jsmangle_scanner::SyntaxKind;

const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "|=", "^=", "&&=",
    "||=", "??=",
];

/// Binary operator precedence; higher binds tighter. `None` for tokens that
/// are not binary operators.
fn binary_precedence(kind: SyntaxKind, text: &str) -> Option<u8> {
    if kind == SyntaxKind::Identifier {
        return match text {
            "instanceof" | "in" => Some(8),
            _ => None,
        };
    }
    if kind != SyntaxKind::Punctuator {
        return None;
    }
    let precedence = match text {
        "??" => 1,
        "||" => 2,
        "&&" => 3,
        "|" => 4,
        "^" => 5,
        "&" => 6,
        "==" | "!=" | "===" | "!==" => 7,
        "<" | ">" | "<=" | ">=" => 8,
        "<<" | ">>" | ">>>" => 9,
        "+" | "-" => 10,
        "*" | "/" | "%" => 11,
        "**" => 12,
        _ => return None,
    };
    Some(precedence)
}

impl ParserState {
    // =========================================================================
    // Expressions
    // =========================================================================

    /// Comma-separated expression.
    pub(super) fn parse_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let first = self.parse_assignment_expression()?;
        if !self.is_punct(",") {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat_punct(",") {
            expressions.push(self.parse_assignment_expression()?);
        }
        Ok(self
            .arena
            .alloc(NodeData::SequenceExpression { expressions }))
    }

    pub(super) fn parse_assignment_expression(&mut self) -> Result<NodeIndex, ParseError> {
        if self.is_arrow_function_start() {
            return self.parse_arrow_function();
        }

        let start = self.token().pos;
        let left = self.parse_conditional_expression()?;
        let token = self.token();
        if token.kind != SyntaxKind::Punctuator
            || !ASSIGNMENT_OPERATORS.contains(&token.text.as_str())
        {
            return Ok(left);
        }
        let operator = self.next_token().text;
        let left = if operator == "=" {
            self.to_assignment_target(left)?
        } else if self.is_simple_assignment_target(left) {
            left
        } else {
            return Err(ParseError::InvalidAssignmentTarget { pos: start });
        };
        let right = self.parse_assignment_expression()?;
        Ok(self.arena.alloc(NodeData::AssignmentExpression {
            operator,
            left,
            right,
        }))
    }

    fn parse_conditional_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let test = self.parse_binary_expression(0)?;
        if !self.eat_punct("?") {
            return Ok(test);
        }
        let consequent = self.with_no_in(false, Self::parse_assignment_expression)?;
        self.expect_punct(":")?;
        let alternate = self.parse_assignment_expression()?;
        Ok(self.arena.alloc(NodeData::ConditionalExpression {
            test,
            consequent,
            alternate,
        }))
    }

    /// Precedence climbing over binary operators binding tighter than
    /// `min_precedence`. `**` is right-associative.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> Result<NodeIndex, ParseError> {
        let mut left = self.parse_unary_expression()?;
        loop {
            let token = self.token();
            if self.no_in && token.is_word("in") {
                break;
            }
            let Some(precedence) = binary_precedence(token.kind, &token.text) else {
                break;
            };
            if precedence <= min_precedence {
                break;
            }
            let operator = self.next_token().text;
            let next_min = if operator == "**" {
                precedence - 1
            } else {
                precedence
            };
            let right = self.parse_binary_expression(next_min)?;
            left = self.arena.alloc(NodeData::BinaryExpression {
                operator,
                left,
                right,
            });
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let token = self.token();
        let is_unary = match token.kind {
            SyntaxKind::Punctuator => matches!(token.text.as_str(), "!" | "~" | "+" | "-"),
            SyntaxKind::Identifier => matches!(token.text.as_str(), "typeof" | "void" | "delete"),
            _ => false,
        };
        if is_unary {
            let operator = self.next_token().text;
            let argument = self.parse_unary_expression()?;
            return Ok(self
                .arena
                .alloc(NodeData::UnaryExpression { operator, argument }));
        }

        if self.is_punct("++") || self.is_punct("--") {
            let pos = self.token().pos;
            let operator = self.next_token().text;
            let argument = self.parse_unary_expression()?;
            if !self.is_simple_assignment_target(argument) {
                return Err(ParseError::InvalidAssignmentTarget { pos });
            }
            return Ok(self.arena.alloc(NodeData::UpdateExpression {
                operator,
                prefix: true,
                argument,
            }));
        }

        let pos = self.token().pos;
        let expression = self.parse_left_hand_side_expression()?;
        let token = self.token();
        if (token.is_punct("++") || token.is_punct("--")) && !token.preceded_by_line_break {
            if !self.is_simple_assignment_target(expression) {
                return Err(ParseError::InvalidAssignmentTarget { pos });
            }
            let operator = self.next_token().text;
            return Ok(self.arena.alloc(NodeData::UpdateExpression {
                operator,
                prefix: false,
                argument: expression,
            }));
        }
        Ok(expression)
    }

    /// Member accesses, calls, and `new` expressions.
    pub(super) fn parse_left_hand_side_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let mut expression = if self.is_word("new") {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        loop {
            if self.eat_punct(".") {
                let property = self.parse_identifier_name()?;
                expression = self.arena.alloc(NodeData::MemberExpression {
                    object: expression,
                    property,
                    optional: false,
                });
            } else if self.eat_punct("?.") {
                expression = if self.is_punct("(") {
                    let arguments = self.parse_arguments()?;
                    self.arena.alloc(NodeData::CallExpression {
                        callee: expression,
                        arguments,
                        optional: true,
                    })
                } else if self.eat_punct("[") {
                    let property = self.with_no_in(false, Self::parse_expression)?;
                    self.expect_punct("]")?;
                    self.arena.alloc(NodeData::ComputedMemberExpression {
                        object: expression,
                        property,
                        optional: true,
                    })
                } else {
                    let property = self.parse_identifier_name()?;
                    self.arena.alloc(NodeData::MemberExpression {
                        object: expression,
                        property,
                        optional: true,
                    })
                };
            } else if self.eat_punct("[") {
                let property = self.with_no_in(false, Self::parse_expression)?;
                self.expect_punct("]")?;
                expression = self.arena.alloc(NodeData::ComputedMemberExpression {
                    object: expression,
                    property,
                    optional: false,
                });
            } else if self.is_punct("(") {
                let arguments = self.parse_arguments()?;
                expression = self.arena.alloc(NodeData::CallExpression {
                    callee: expression,
                    arguments,
                    optional: false,
                });
            } else {
                break;
            }
        }
        Ok(expression)
    }

    fn parse_new_expression(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_word("new")?;
        let mut callee = if self.is_word("new") {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        loop {
            if self.eat_punct(".") {
                let property = self.parse_identifier_name()?;
                callee = self.arena.alloc(NodeData::MemberExpression {
                    object: callee,
                    property,
                    optional: false,
                });
            } else if self.eat_punct("[") {
                let property = self.with_no_in(false, Self::parse_expression)?;
                self.expect_punct("]")?;
                callee = self.arena.alloc(NodeData::ComputedMemberExpression {
                    object: callee,
                    property,
                    optional: false,
                });
            } else {
                break;
            }
        }
        let arguments = if self.is_punct("(") {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(self
            .arena
            .alloc(NodeData::NewExpression { callee, arguments }))
    }

    fn parse_arguments(&mut self) -> Result<Vec<NodeIndex>, ParseError> {
        self.expect_punct("(")?;
        let mut arguments = Vec::new();
        while !self.is_punct(")") {
            arguments.push(self.parse_spread_or_assignment()?);
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(")")?;
        Ok(arguments)
    }

    fn parse_spread_or_assignment(&mut self) -> Result<NodeIndex, ParseError> {
        if self.eat_punct("...") {
            let argument = self.with_no_in(false, Self::parse_assignment_expression)?;
            Ok(self.arena.alloc(NodeData::SpreadElement { argument }))
        } else {
            self.with_no_in(false, Self::parse_assignment_expression)
        }
    }

    fn parse_primary_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let token = self.token();
        match token.kind {
            SyntaxKind::NumericLiteral => {
                let raw = self.next_token().text;
                Ok(self.arena.alloc(NodeData::NumericLiteral { raw }))
            }
            SyntaxKind::StringLiteral => {
                let raw = self.next_token().text;
                Ok(self.arena.alloc(NodeData::StringLiteral { raw }))
            }
            SyntaxKind::Identifier => match token.text.as_str() {
                "function" => self.parse_function_expression(),
                "class" => self.parse_class_expression(),
                "this" => {
                    self.next_token();
                    Ok(self.arena.alloc(NodeData::ThisExpression))
                }
                "null" => {
                    self.next_token();
                    Ok(self.arena.alloc(NodeData::NullLiteral))
                }
                "true" | "false" => {
                    let value = self.next_token().text == "true";
                    Ok(self.arena.alloc(NodeData::BooleanLiteral { value }))
                }
                _ => self.parse_identifier(),
            },
            SyntaxKind::Punctuator => match token.text.as_str() {
                "(" => {
                    self.next_token();
                    let expression = self.with_no_in(false, Self::parse_expression)?;
                    self.expect_punct(")")?;
                    Ok(self
                        .arena
                        .alloc(NodeData::ParenthesizedExpression { expression }))
                }
                "[" => self.parse_array_literal(),
                "{" => self.parse_object_literal(),
                _ => Err(self.unexpected("expression")),
            },
            SyntaxKind::EndOfFile => Err(self.unexpected("expression")),
        }
    }

    fn parse_array_literal(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_punct("[")?;
        let mut elements = Vec::new();
        while !self.is_punct("]") {
            if self.eat_punct(",") {
                elements.push(NodeIndex::NONE);
                continue;
            }
            elements.push(self.parse_spread_or_assignment()?);
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct("]")?;
        Ok(self.arena.alloc(NodeData::ArrayExpression { elements }))
    }

    fn parse_object_literal(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_punct("{")?;
        let mut properties = Vec::new();
        while !self.is_punct("}") {
            if self.eat_punct("...") {
                let argument = self.with_no_in(false, Self::parse_assignment_expression)?;
                properties.push(self.arena.alloc(NodeData::SpreadElement { argument }));
            } else {
                properties.push(self.parse_object_property()?);
            }
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct("}")?;
        Ok(self.arena.alloc(NodeData::ObjectExpression { properties }))
    }

    fn parse_object_property(&mut self) -> Result<NodeIndex, ParseError> {
        let accessor = self.parse_accessor_prefix();
        let key_is_identifier = self.is_identifier();
        let key = self.parse_property_key()?;

        if let Some(accessor) = accessor {
            let kind = if accessor == "get" {
                PropertyKind::Get
            } else {
                PropertyKind::Set
            };
            return self.finish_method_property(key, kind);
        }
        if self.is_punct("(") {
            return self.finish_method_property(key, PropertyKind::Method);
        }
        if self.eat_punct(":") {
            let value = self.with_no_in(false, Self::parse_assignment_expression)?;
            return Ok(self.arena.alloc(NodeData::Property {
                key,
                value,
                shorthand: false,
                kind: PropertyKind::Init,
            }));
        }

        // Shorthand `name`, or `name = default` when the literal is later
        // reinterpreted as a pattern.
        let PropertyKey::Identifier(name) = &key else {
            return Err(self.unexpected("':'"));
        };
        if !key_is_identifier {
            return Err(self.unexpected("':'"));
        }
        let identifier = self.arena.alloc_identifier(name.clone());
        let value = if self.eat_punct("=") {
            let right = self.with_no_in(false, Self::parse_assignment_expression)?;
            self.arena.alloc(NodeData::AssignmentExpression {
                operator: "=".to_string(),
                left: identifier,
                right,
            })
        } else {
            identifier
        };
        Ok(self.arena.alloc(NodeData::Property {
            key,
            value,
            shorthand: true,
            kind: PropertyKind::Init,
        }))
    }

    fn finish_method_property(
        &mut self,
        key: PropertyKey,
        kind: PropertyKind,
    ) -> Result<NodeIndex, ParseError> {
        let (params, body) = self.parse_function_rest()?;
        let value = self
            .arena
            .alloc(NodeData::FunctionExpression(FunctionData {
                id: NodeIndex::NONE,
                params,
                body,
            }));
        Ok(self.arena.alloc(NodeData::Property {
            key,
            value,
            shorthand: false,
            kind,
        }))
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    /// `ident =>` or a parenthesized list whose closing paren is followed by `=>`.
    fn is_arrow_function_start(&self) -> bool {
        if self.is_identifier() {
            return self.peek(1).is_punct("=>");
        }
        if !self.is_punct("(") {
            return false;
        }
        let mut depth = 0usize;
        let mut offset = 0usize;
        loop {
            let token = self.peek(offset);
            match token.kind {
                SyntaxKind::EndOfFile => return false,
                SyntaxKind::Punctuator => match token.text.as_str() {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            return token.text == ")" && self.peek(offset + 1).is_punct("=>");
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
            offset += 1;
        }
    }

    fn parse_arrow_function(&mut self) -> Result<NodeIndex, ParseError> {
        let params = if self.is_punct("(") {
            self.parse_parameters()?
        } else {
            vec![self.parse_identifier()?]
        };
        self.expect_punct("=>")?;
        if self.is_punct("{") {
            let body = self.with_no_in(false, Self::parse_block)?;
            Ok(self.arena.alloc(NodeData::ArrowFunctionExpression {
                params,
                body,
                expression: false,
            }))
        } else {
            let body = self.parse_assignment_expression()?;
            Ok(self.arena.alloc(NodeData::ArrowFunctionExpression {
                params,
                body,
                expression: true,
            }))
        }
    }

    // =========================================================================
    // Assignment targets
    // =========================================================================

    fn is_simple_assignment_target(&self, index: NodeIndex) -> bool {
        match self.arena.data(index) {
            Some(
                NodeData::Identifier { .. }
                | NodeData::MemberExpression { optional: false, .. }
                | NodeData::ComputedMemberExpression { optional: false, .. },
            ) => true,
            Some(NodeData::ParenthesizedExpression { expression }) => {
                self.is_simple_assignment_target(*expression)
            }
            _ => false,
        }
    }

    /// Reinterpret an expression parsed ahead of `=` (or in a `for`-`in`
    /// head) as an assignment target. Object and array literals are rewritten
    /// in place into patterns. Returns the node to use as the target.
    pub(super) fn to_assignment_target(
        &mut self,
        index: NodeIndex,
    ) -> Result<NodeIndex, ParseError> {
        let Some(data) = self.arena.data(index).cloned() else {
            return Err(ParseError::InvalidAssignmentTarget { pos: 0 });
        };
        let pos = self.token().pos;
        let converted = match data {
            NodeData::Identifier { .. }
            | NodeData::MemberExpression { optional: false, .. }
            | NodeData::ComputedMemberExpression { optional: false, .. } => return Ok(index),
            NodeData::ParenthesizedExpression { expression } => {
                return if self.is_simple_assignment_target(expression) {
                    Ok(expression)
                } else {
                    Err(ParseError::InvalidAssignmentTarget { pos })
                };
            }
            NodeData::ObjectExpression { properties } => {
                let mut converted = Vec::with_capacity(properties.len());
                for property in properties {
                    converted.push(self.to_object_pattern_property(property)?);
                }
                NodeData::ObjectPattern {
                    properties: converted,
                }
            }
            NodeData::ArrayExpression { elements } => {
                let mut converted = Vec::with_capacity(elements.len());
                for element in elements {
                    converted.push(if element.is_none() {
                        element
                    } else {
                        self.to_pattern_element(element)?
                    });
                }
                NodeData::ArrayPattern {
                    elements: converted,
                }
            }
            _ => return Err(ParseError::InvalidAssignmentTarget { pos }),
        };
        self.rewrite_in_place(index, converted);
        Ok(index)
    }

    /// Array element or property value: a target, `target = default`, or
    /// (for rest positions) a spread.
    fn to_pattern_element(&mut self, index: NodeIndex) -> Result<NodeIndex, ParseError> {
        match self.arena.data(index).cloned() {
            Some(NodeData::AssignmentExpression {
                operator,
                left,
                right,
            }) if operator == "=" => {
                self.rewrite_in_place(index, NodeData::AssignmentPattern { left, right });
                Ok(index)
            }
            Some(NodeData::SpreadElement { argument }) => {
                let argument = self.to_assignment_target(argument)?;
                self.rewrite_in_place(index, NodeData::RestElement { argument });
                Ok(index)
            }
            _ => self.to_assignment_target(index),
        }
    }

    fn to_object_pattern_property(&mut self, index: NodeIndex) -> Result<NodeIndex, ParseError> {
        let pos = self.token().pos;
        match self.arena.data(index).cloned() {
            Some(NodeData::Property {
                key,
                value,
                shorthand,
                kind: PropertyKind::Init,
            }) => {
                let value = self.to_pattern_element(value)?;
                self.rewrite_in_place(
                    index,
                    NodeData::Property {
                        key,
                        value,
                        shorthand,
                        kind: PropertyKind::Init,
                    },
                );
                Ok(index)
            }
            Some(NodeData::SpreadElement { .. }) => self.to_pattern_element(index),
            _ => Err(ParseError::InvalidAssignmentTarget { pos }),
        }
    }

    fn rewrite_in_place(&mut self, index: NodeIndex, data: NodeData) {
        if let Some(node) = self.arena.get_mut(index) {
            node.data = data;
        }
        self.arena.adopt_children(index);
    }
}
