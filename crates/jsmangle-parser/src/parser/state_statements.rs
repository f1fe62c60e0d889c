//! Parser state - statement and declaration parsing methods

use super::ParseError;
use super::state::ParserState;
use crate::base::NodeIndex;
use crate::node::{
    ClassData, FunctionData, MethodKind, NodeData, PropertyKey, PropertyKind, SourceType, VarKind,
};
use jsmangle_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Statements
    // =========================================================================

    pub(super) fn parse_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let token = self.token();
        if token.kind == SyntaxKind::Punctuator {
            if token.text == "{" {
                return self.parse_block();
            }
            if token.text == ";" {
                self.next_token();
                return Ok(self.arena.alloc(NodeData::EmptyStatement));
            }
        } else if token.kind == SyntaxKind::Identifier {
            match token.text.as_str() {
                "var" | "let" | "const" => {
                    let declaration = self.parse_variable_declaration()?;
                    self.consume_semicolon()?;
                    return Ok(declaration);
                }
                "function" => return self.parse_function_declaration(false),
                "class" => return self.parse_class_declaration(false),
                "if" => return self.parse_if_statement(),
                "for" => return self.parse_for_statement(),
                "while" => return self.parse_while_statement(),
                "do" => return self.parse_do_while_statement(),
                "return" => return self.parse_return_statement(),
                "break" | "continue" => return self.parse_break_or_continue(),
                "throw" => return self.parse_throw_statement(),
                "try" => return self.parse_try_statement(),
                "import" if !self.peek(1).is_punct("(") && !self.peek(1).is_punct(".") => {
                    return self.parse_import_declaration();
                }
                "export" => return self.parse_export_declaration(),
                _ => {
                    if self.is_identifier() && self.peek(1).is_punct(":") {
                        return self.parse_labeled_statement();
                    }
                }
            }
        }

        let expression = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(self
            .arena
            .alloc(NodeData::ExpressionStatement { expression }))
    }

    pub(super) fn parse_block(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_punct("{")?;
        let mut body = Vec::new();
        while !self.is_punct("}") {
            if self.token().kind == SyntaxKind::EndOfFile {
                return Err(self.unexpected("'}'"));
            }
            body.push(self.parse_statement()?);
        }
        self.next_token();
        Ok(self.arena.alloc(NodeData::BlockStatement { body }))
    }

    /// `var`/`let`/`const` declaration list without the trailing semicolon.
    pub(super) fn parse_variable_declaration(&mut self) -> Result<NodeIndex, ParseError> {
        let kind = match self.next_token().text.as_str() {
            "var" => VarKind::Var,
            "let" => VarKind::Let,
            _ => VarKind::Const,
        };
        let mut declarations = Vec::new();
        loop {
            let id = self.parse_binding_target()?;
            let init = if self.eat_punct("=") {
                self.parse_assignment_expression()?
            } else {
                NodeIndex::NONE
            };
            declarations.push(self.arena.alloc(NodeData::VariableDeclarator { id, init }));
            if !self.eat_punct(",") {
                break;
            }
        }
        Ok(self
            .arena
            .alloc(NodeData::VariableDeclaration { kind, declarations }))
    }

    fn parse_if_statement(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_word("if")?;
        self.expect_punct("(")?;
        let test = self.parse_expression()?;
        self.expect_punct(")")?;
        let consequent = self.parse_statement()?;
        let alternate = if self.eat_word("else") {
            self.parse_statement()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.arena.alloc(NodeData::IfStatement {
            test,
            consequent,
            alternate,
        }))
    }

    fn parse_for_statement(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_word("for")?;
        self.expect_punct("(")?;

        let init = if self.is_punct(";") {
            NodeIndex::NONE
        } else if self.is_word("var") || self.is_word("let") || self.is_word("const") {
            self.with_no_in(true, Self::parse_variable_declaration)?
        } else {
            self.with_no_in(true, Self::parse_expression)?
        };

        if self.is_word("in") || self.is_word("of") {
            let is_of = self.next_token().text == "of";
            let left = if matches!(
                self.arena.data(init),
                Some(NodeData::VariableDeclaration { .. })
            ) {
                init
            } else {
                self.to_assignment_target(init)?
            };
            let right = if is_of {
                self.parse_assignment_expression()?
            } else {
                self.parse_expression()?
            };
            self.expect_punct(")")?;
            let body = self.parse_statement()?;
            return Ok(self.arena.alloc(NodeData::ForInStatement {
                left,
                right,
                body,
                is_of,
            }));
        }

        self.expect_punct(";")?;
        let test = if self.is_punct(";") {
            NodeIndex::NONE
        } else {
            self.parse_expression()?
        };
        self.expect_punct(";")?;
        let update = if self.is_punct(")") {
            NodeIndex::NONE
        } else {
            self.parse_expression()?
        };
        self.expect_punct(")")?;
        let body = self.parse_statement()?;
        Ok(self.arena.alloc(NodeData::ForStatement {
            init,
            test,
            update,
            body,
        }))
    }

    fn parse_while_statement(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_word("while")?;
        self.expect_punct("(")?;
        let test = self.parse_expression()?;
        self.expect_punct(")")?;
        let body = self.parse_statement()?;
        Ok(self.arena.alloc(NodeData::WhileStatement { test, body }))
    }

    fn parse_do_while_statement(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_word("do")?;
        let body = self.parse_statement()?;
        self.expect_word("while")?;
        self.expect_punct("(")?;
        let test = self.parse_expression()?;
        self.expect_punct(")")?;
        self.eat_punct(";");
        Ok(self.arena.alloc(NodeData::DoWhileStatement { body, test }))
    }

    fn parse_return_statement(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_word("return")?;
        let argument = if self.has_operand_on_same_line() {
            self.parse_expression()?
        } else {
            NodeIndex::NONE
        };
        self.consume_semicolon()?;
        Ok(self.arena.alloc(NodeData::ReturnStatement { argument }))
    }

    fn parse_break_or_continue(&mut self) -> Result<NodeIndex, ParseError> {
        let is_break = self.next_token().text == "break";
        let label = if self.is_identifier() && !self.token().preceded_by_line_break {
            self.parse_identifier()?
        } else {
            NodeIndex::NONE
        };
        self.consume_semicolon()?;
        Ok(self.arena.alloc(if is_break {
            NodeData::BreakStatement { label }
        } else {
            NodeData::ContinueStatement { label }
        }))
    }

    fn parse_throw_statement(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_word("throw")?;
        let argument = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(self.arena.alloc(NodeData::ThrowStatement { argument }))
    }

    fn parse_try_statement(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_word("try")?;
        let block = self.parse_block()?;
        let handler = if self.eat_word("catch") {
            let param = if self.eat_punct("(") {
                let param = self.parse_binding_target()?;
                self.expect_punct(")")?;
                param
            } else {
                NodeIndex::NONE
            };
            let body = self.parse_block()?;
            self.arena.alloc(NodeData::CatchClause { param, body })
        } else {
            NodeIndex::NONE
        };
        let finalizer = if self.eat_word("finally") {
            self.parse_block()?
        } else {
            NodeIndex::NONE
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected("'catch' or 'finally'"));
        }
        Ok(self.arena.alloc(NodeData::TryStatement {
            block,
            handler,
            finalizer,
        }))
    }

    fn parse_labeled_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let label = self.parse_identifier()?;
        self.expect_punct(":")?;
        let body = self.parse_statement()?;
        Ok(self
            .arena
            .alloc(NodeData::LabeledStatement { label, body }))
    }

    /// Whether the current token starts an operand of `return` (no line
    /// break, not a statement terminator).
    fn has_operand_on_same_line(&self) -> bool {
        let token = self.token();
        !(token.preceded_by_line_break
            || token.kind == SyntaxKind::EndOfFile
            || token.is_punct(";")
            || token.is_punct("}"))
    }

    // =========================================================================
    // Functions and classes
    // =========================================================================

    /// Function declaration. With `allow_anonymous` (export default) the name
    /// may be omitted.
    pub(super) fn parse_function_declaration(
        &mut self,
        allow_anonymous: bool,
    ) -> Result<NodeIndex, ParseError> {
        self.expect_word("function")?;
        let id = if allow_anonymous && self.is_punct("(") {
            NodeIndex::NONE
        } else {
            self.parse_identifier()?
        };
        let (params, body) = self.parse_function_rest()?;
        Ok(self
            .arena
            .alloc(NodeData::FunctionDeclaration(FunctionData { id, params, body })))
    }

    pub(super) fn parse_function_expression(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_word("function")?;
        let id = if self.is_identifier() {
            self.parse_identifier()?
        } else {
            NodeIndex::NONE
        };
        let (params, body) = self.parse_function_rest()?;
        Ok(self
            .arena
            .alloc(NodeData::FunctionExpression(FunctionData { id, params, body })))
    }

    /// Parameter list and body block.
    pub(super) fn parse_function_rest(&mut self) -> Result<(Vec<NodeIndex>, NodeIndex), ParseError> {
        let params = self.parse_parameters()?;
        let body = self.with_no_in(false, Self::parse_block)?;
        Ok((params, body))
    }

    pub(super) fn parse_parameters(&mut self) -> Result<Vec<NodeIndex>, ParseError> {
        self.expect_punct("(")?;
        let mut params = Vec::new();
        while !self.is_punct(")") {
            if self.eat_punct("...") {
                let argument = self.parse_binding_target()?;
                params.push(self.arena.alloc(NodeData::RestElement { argument }));
            } else {
                params.push(self.parse_binding_element()?);
            }
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(")")?;
        Ok(params)
    }

    pub(super) fn parse_class_declaration(
        &mut self,
        allow_anonymous: bool,
    ) -> Result<NodeIndex, ParseError> {
        self.expect_word("class")?;
        let id = if allow_anonymous && !self.is_identifier() {
            NodeIndex::NONE
        } else {
            self.parse_identifier()?
        };
        let class = self.parse_class_rest(id)?;
        Ok(self.arena.alloc(NodeData::ClassDeclaration(class)))
    }

    pub(super) fn parse_class_expression(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_word("class")?;
        let id = if self.is_identifier() {
            self.parse_identifier()?
        } else {
            NodeIndex::NONE
        };
        let class = self.parse_class_rest(id)?;
        Ok(self.arena.alloc(NodeData::ClassExpression(class)))
    }

    fn parse_class_rest(&mut self, id: NodeIndex) -> Result<ClassData, ParseError> {
        let super_class = if self.eat_word("extends") {
            self.parse_left_hand_side_expression()?
        } else {
            NodeIndex::NONE
        };
        self.expect_punct("{")?;
        let mut members = Vec::new();
        loop {
            if self.eat_punct(";") {
                continue;
            }
            if self.eat_punct("}") {
                break;
            }
            if self.token().kind == SyntaxKind::EndOfFile {
                return Err(self.unexpected("'}'"));
            }
            members.push(self.parse_class_member()?);
        }
        Ok(ClassData {
            id,
            super_class,
            members,
        })
    }

    fn parse_class_member(&mut self) -> Result<NodeIndex, ParseError> {
        let is_static = self.is_word("static") && !self.peek(1).is_punct("(");
        if is_static {
            self.next_token();
        }
        let kind = self.parse_accessor_prefix();
        let kind = match kind.as_deref() {
            Some("get") => MethodKind::Get,
            Some("set") => MethodKind::Set,
            _ => MethodKind::Method,
        };
        let key = self.parse_property_key()?;
        let (params, body) = self.parse_function_rest()?;
        let value = self.arena.alloc(NodeData::FunctionExpression(FunctionData {
            id: NodeIndex::NONE,
            params,
            body,
        }));
        Ok(self.arena.alloc(NodeData::ClassMethod {
            key,
            kind,
            is_static,
            value,
        }))
    }

    /// Consume a `get`/`set` prefix when it is followed by a property key
    /// rather than being the key itself.
    pub(super) fn parse_accessor_prefix(&mut self) -> Option<String> {
        if !(self.is_word("get") || self.is_word("set")) {
            return None;
        }
        let next = self.peek(1);
        let is_key_itself = next.is_punct("(")
            || next.is_punct(":")
            || next.is_punct(",")
            || next.is_punct("}")
            || next.is_punct("=")
            || next.is_punct(";");
        if is_key_itself {
            None
        } else {
            Some(self.next_token().text)
        }
    }

    pub(super) fn parse_property_key(&mut self) -> Result<PropertyKey, ParseError> {
        let token = self.token();
        match token.kind {
            SyntaxKind::Identifier => Ok(PropertyKey::Identifier(self.next_token().text)),
            SyntaxKind::StringLiteral => Ok(PropertyKey::String(self.next_token().text)),
            SyntaxKind::NumericLiteral => Ok(PropertyKey::Numeric(self.next_token().text)),
            _ if token.is_punct("[") => {
                self.next_token();
                let expression = self.with_no_in(false, Self::parse_assignment_expression)?;
                self.expect_punct("]")?;
                Ok(PropertyKey::Computed(expression))
            }
            _ => Err(self.unexpected("property name")),
        }
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    /// Identifier, object pattern, or array pattern.
    pub(super) fn parse_binding_target(&mut self) -> Result<NodeIndex, ParseError> {
        if self.is_punct("{") {
            self.parse_object_binding_pattern()
        } else if self.is_punct("[") {
            self.parse_array_binding_pattern()
        } else {
            self.parse_identifier()
        }
    }

    /// Binding target with an optional `= default`.
    pub(super) fn parse_binding_element(&mut self) -> Result<NodeIndex, ParseError> {
        let left = self.parse_binding_target()?;
        if self.eat_punct("=") {
            let right = self.with_no_in(false, Self::parse_assignment_expression)?;
            Ok(self
                .arena
                .alloc(NodeData::AssignmentPattern { left, right }))
        } else {
            Ok(left)
        }
    }

    fn parse_object_binding_pattern(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_punct("{")?;
        let mut properties = Vec::new();
        while !self.is_punct("}") {
            if self.eat_punct("...") {
                let argument = self.parse_identifier()?;
                properties.push(self.arena.alloc(NodeData::RestElement { argument }));
            } else {
                properties.push(self.parse_binding_property()?);
            }
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct("}")?;
        Ok(self.arena.alloc(NodeData::ObjectPattern { properties }))
    }

    fn parse_binding_property(&mut self) -> Result<NodeIndex, ParseError> {
        let is_shorthand_candidate = self.is_identifier() && !self.peek(1).is_punct(":");
        if is_shorthand_candidate {
            let name = self.token().text.clone();
            let value = self.parse_binding_element()?;
            return Ok(self.arena.alloc(NodeData::Property {
                key: PropertyKey::Identifier(name),
                value,
                shorthand: true,
                kind: PropertyKind::Init,
            }));
        }
        let key = self.parse_property_key()?;
        self.expect_punct(":")?;
        let value = self.parse_binding_element()?;
        Ok(self.arena.alloc(NodeData::Property {
            key,
            value,
            shorthand: false,
            kind: PropertyKind::Init,
        }))
    }

    fn parse_array_binding_pattern(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_punct("[")?;
        let mut elements = Vec::new();
        while !self.is_punct("]") {
            if self.eat_punct(",") {
                elements.push(NodeIndex::NONE);
                continue;
            }
            if self.eat_punct("...") {
                let argument = self.parse_binding_target()?;
                elements.push(self.arena.alloc(NodeData::RestElement { argument }));
            } else {
                elements.push(self.parse_binding_element()?);
            }
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct("]")?;
        Ok(self.arena.alloc(NodeData::ArrayPattern { elements }))
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn ensure_module(&self, keyword: &str) -> Result<(), ParseError> {
        if self.source_type == SourceType::Module {
            Ok(())
        } else {
            Err(ParseError::ModuleSyntaxInScript {
                keyword: keyword.to_string(),
                pos: self.token().pos,
            })
        }
    }

    fn parse_module_source(&mut self) -> Result<String, ParseError> {
        if self.token().kind == SyntaxKind::StringLiteral {
            Ok(self.next_token().text)
        } else {
            Err(self.unexpected("module specifier"))
        }
    }

    fn parse_import_declaration(&mut self) -> Result<NodeIndex, ParseError> {
        self.ensure_module("import")?;
        self.expect_word("import")?;
        let mut specifiers = Vec::new();

        if self.token().kind == SyntaxKind::StringLiteral {
            let source = self.parse_module_source()?;
            self.consume_semicolon()?;
            return Ok(self.arena.alloc(NodeData::ImportDeclaration { specifiers, source }));
        }

        if self.is_identifier() {
            let local = self.parse_identifier()?;
            specifiers.push(self.arena.alloc(NodeData::ImportDefaultSpecifier { local }));
            if !self.eat_punct(",") {
                return self.finish_import(specifiers);
            }
        }

        if self.eat_punct("*") {
            self.expect_word("as")?;
            let local = self.parse_identifier()?;
            specifiers.push(self.arena.alloc(NodeData::ImportNamespaceSpecifier { local }));
        } else {
            self.expect_punct("{")?;
            while !self.is_punct("}") {
                let imported = if self.token().kind == SyntaxKind::StringLiteral {
                    self.next_token().text
                } else {
                    self.parse_identifier_name()?
                };
                let local = if self.eat_word("as") {
                    self.parse_identifier()?
                } else {
                    self.arena.alloc_identifier(imported.clone())
                };
                specifiers.push(self.arena.alloc(NodeData::ImportSpecifier { imported, local }));
                if !self.eat_punct(",") {
                    break;
                }
            }
            self.expect_punct("}")?;
        }
        self.finish_import(specifiers)
    }

    fn finish_import(&mut self, specifiers: Vec<NodeIndex>) -> Result<NodeIndex, ParseError> {
        self.expect_word("from")?;
        let source = self.parse_module_source()?;
        self.consume_semicolon()?;
        Ok(self
            .arena
            .alloc(NodeData::ImportDeclaration { specifiers, source }))
    }

    fn parse_export_declaration(&mut self) -> Result<NodeIndex, ParseError> {
        self.ensure_module("export")?;
        self.expect_word("export")?;

        if self.eat_word("default") {
            let declaration = if self.is_word("function") {
                self.parse_function_declaration(true)?
            } else if self.is_word("class") {
                self.parse_class_declaration(true)?
            } else {
                let expression = self.parse_assignment_expression()?;
                self.consume_semicolon()?;
                expression
            };
            return Ok(self
                .arena
                .alloc(NodeData::ExportDefaultDeclaration { declaration }));
        }

        if self.is_punct("{") {
            return self.parse_export_specifiers();
        }

        let declaration = if self.is_word("var") || self.is_word("let") || self.is_word("const") {
            let declaration = self.parse_variable_declaration()?;
            self.consume_semicolon()?;
            declaration
        } else if self.is_word("function") {
            self.parse_function_declaration(false)?
        } else if self.is_word("class") {
            self.parse_class_declaration(false)?
        } else {
            return Err(self.unexpected("declaration"));
        };
        Ok(self.arena.alloc(NodeData::ExportNamedDeclaration {
            declaration,
            specifiers: Vec::new(),
            source: None,
        }))
    }

    fn parse_export_specifiers(&mut self) -> Result<NodeIndex, ParseError> {
        self.expect_punct("{")?;
        let mut specifiers = Vec::new();
        while !self.is_punct("}") {
            let local_name = self.parse_identifier_name()?;
            let exported = if self.eat_word("as") {
                if self.token().kind == SyntaxKind::StringLiteral {
                    self.next_token().text
                } else {
                    self.parse_identifier_name()?
                }
            } else {
                local_name.clone()
            };
            let local = self.arena.alloc_identifier(local_name);
            specifiers.push(self.arena.alloc(NodeData::ExportSpecifier { local, exported }));
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct("}")?;
        let source = if self.eat_word("from") {
            Some(self.parse_module_source()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(self.arena.alloc(NodeData::ExportNamedDeclaration {
            declaration: NodeIndex::NONE,
            specifiers,
            source,
        }))
    }
}
