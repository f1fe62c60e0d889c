use super::Printer;
use jsmangle_parser::{NodeData, NodeIndex};

impl<'a> Printer<'a> {
    // =========================================================================
    // Statements and declarations
    // =========================================================================

    pub(super) fn emit_statement(&mut self, index: NodeIndex, data: &NodeData) {
        match data {
            NodeData::VariableDeclaration { .. } => {
                self.emit_variable_declaration(index);
                self.write(";");
            }
            NodeData::VariableDeclarator { id, init } => {
                self.emit(*id);
                if init.is_some() {
                    self.write(" = ");
                    self.emit(*init);
                }
            }
            NodeData::FunctionDeclaration(func) => {
                self.write("function ");
                self.emit(func.id);
                self.emit_function_rest(&func.params, func.body);
            }
            NodeData::ClassDeclaration(class) => self.emit_class(class),
            NodeData::ExpressionStatement { expression } => {
                self.emit(*expression);
                self.write(";");
            }
            NodeData::BlockStatement { body } => {
                if body.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{");
                for &statement in body {
                    self.write_space();
                    self.emit(statement);
                }
                self.write(" }");
            }
            NodeData::EmptyStatement => self.write(";"),
            NodeData::ReturnStatement { argument } => {
                self.write("return");
                if argument.is_some() {
                    self.write_space();
                    self.emit(*argument);
                }
                self.write(";");
            }
            NodeData::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                self.write("if (");
                self.emit(*test);
                self.write(") ");
                self.emit(*consequent);
                if alternate.is_some() {
                    self.write(" else ");
                    self.emit(*alternate);
                }
            }
            NodeData::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                self.write("for (");
                self.emit_for_head_left(*init);
                self.write(";");
                if test.is_some() {
                    self.write_space();
                    self.emit(*test);
                }
                self.write(";");
                if update.is_some() {
                    self.write_space();
                    self.emit(*update);
                }
                self.write(") ");
                self.emit(*body);
            }
            NodeData::ForInStatement {
                left,
                right,
                body,
                is_of,
            } => {
                self.write("for (");
                self.emit_for_head_left(*left);
                self.write(if *is_of { " of " } else { " in " });
                self.emit(*right);
                self.write(") ");
                self.emit(*body);
            }
            NodeData::WhileStatement { test, body } => {
                self.write("while (");
                self.emit(*test);
                self.write(") ");
                self.emit(*body);
            }
            NodeData::DoWhileStatement { body, test } => {
                self.write("do ");
                self.emit(*body);
                self.write(" while (");
                self.emit(*test);
                self.write(");");
            }
            NodeData::LabeledStatement { label, body } => {
                self.emit(*label);
                self.write(": ");
                self.emit(*body);
            }
            NodeData::BreakStatement { label } => self.emit_jump("break", *label),
            NodeData::ContinueStatement { label } => self.emit_jump("continue", *label),
            NodeData::ThrowStatement { argument } => {
                self.write("throw ");
                self.emit(*argument);
                self.write(";");
            }
            NodeData::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                self.write("try ");
                self.emit(*block);
                if handler.is_some() {
                    self.write_space();
                    self.emit(*handler);
                }
                if finalizer.is_some() {
                    self.write(" finally ");
                    self.emit(*finalizer);
                }
            }
            NodeData::CatchClause { param, body } => {
                self.write("catch ");
                if param.is_some() {
                    self.write("(");
                    self.emit(*param);
                    self.write(") ");
                }
                self.emit(*body);
            }
            NodeData::ImportDeclaration { specifiers, source } => {
                self.emit_import(specifiers, source);
            }
            NodeData::ImportSpecifier { imported, local } => {
                let local_name = self.arena.identifier_name(*local).unwrap_or_default();
                if local_name != imported.as_str() {
                    self.write(imported);
                    self.write(" as ");
                }
                self.emit(*local);
            }
            NodeData::ImportDefaultSpecifier { local } => self.emit(*local),
            NodeData::ImportNamespaceSpecifier { local } => {
                self.write("* as ");
                self.emit(*local);
            }
            NodeData::ExportNamedDeclaration {
                declaration,
                specifiers,
                source,
            } => {
                self.write("export ");
                if declaration.is_some() {
                    self.emit(*declaration);
                    return;
                }
                if specifiers.is_empty() {
                    self.write("{}");
                } else {
                    self.write("{ ");
                    self.emit_comma_list(specifiers);
                    self.write(" }");
                }
                if let Some(source) = source {
                    self.write(" from ");
                    self.write(source);
                }
                self.write(";");
            }
            NodeData::ExportSpecifier { local, exported } => {
                self.emit(*local);
                if self.arena.identifier_name(*local) != Some(exported.as_str()) {
                    self.write(" as ");
                    self.write(exported);
                }
            }
            NodeData::ExportDefaultDeclaration { declaration } => {
                self.write("export default ");
                self.emit(*declaration);
                if !self.arena.is_declaration(*declaration) {
                    self.write(";");
                }
            }
            _ => {}
        }
    }

    /// `var`/`let`/`const` list without a terminator.
    fn emit_variable_declaration(&mut self, index: NodeIndex) {
        if let Some(NodeData::VariableDeclaration { kind, declarations }) = self.arena.data(index) {
            self.write(kind.as_str());
            self.write_space();
            self.emit_comma_list(declarations);
        }
    }

    fn emit_for_head_left(&mut self, left: NodeIndex) {
        if matches!(
            self.arena.data(left),
            Some(NodeData::VariableDeclaration { .. })
        ) {
            self.emit_variable_declaration(left);
        } else {
            self.emit(left);
        }
    }

    fn emit_jump(&mut self, keyword: &str, label: NodeIndex) {
        self.write(keyword);
        if label.is_some() {
            self.write_space();
            self.emit(label);
        }
        self.write(";");
    }

    fn emit_import(&mut self, specifiers: &[NodeIndex], source: &str) {
        self.write("import ");
        if specifiers.is_empty() {
            self.write(source);
            self.write(";");
            return;
        }
        let mut named = Vec::new();
        let mut wrote_clause = false;
        for &specifier in specifiers {
            match self.arena.data(specifier) {
                Some(NodeData::ImportSpecifier { .. }) => named.push(specifier),
                _ => {
                    if wrote_clause {
                        self.write(", ");
                    }
                    self.emit(specifier);
                    wrote_clause = true;
                }
            }
        }
        if !named.is_empty() {
            if wrote_clause {
                self.write(", ");
            }
            self.write("{ ");
            self.emit_comma_list(&named);
            self.write(" }");
        }
        self.write(" from ");
        self.write(source);
        self.write(";");
    }
}
