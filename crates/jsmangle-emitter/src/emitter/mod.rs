mod expressions;
mod statements;

use jsmangle_parser::{NodeArena, NodeData, NodeIndex, PropertyKey};

/// Renders an arena tree back to JavaScript source text.
pub struct Printer<'a> {
    pub(super) arena: &'a NodeArena,
    output: String,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Printer {
            arena,
            output: String::new(),
        }
    }

    /// Print the tree rooted at `root`.
    pub fn emit_to_string(arena: &NodeArena, root: NodeIndex) -> String {
        let mut printer = Printer::new(arena);
        printer.emit(root);
        printer.finish()
    }

    pub fn finish(self) -> String {
        self.output
    }

    /// Emit any node. Absent nodes print nothing.
    pub fn emit(&mut self, index: NodeIndex) {
        let Some(data) = self.arena.data(index) else {
            return;
        };
        match data {
            NodeData::Program { body, .. } => {
                for (position, &statement) in body.iter().enumerate() {
                    if position > 0 {
                        self.write_line();
                    }
                    self.emit(statement);
                }
            }
            NodeData::VariableDeclaration { .. }
            | NodeData::FunctionDeclaration(_)
            | NodeData::ClassDeclaration(_)
            | NodeData::ExpressionStatement { .. }
            | NodeData::BlockStatement { .. }
            | NodeData::EmptyStatement
            | NodeData::ReturnStatement { .. }
            | NodeData::IfStatement { .. }
            | NodeData::ForStatement { .. }
            | NodeData::ForInStatement { .. }
            | NodeData::WhileStatement { .. }
            | NodeData::DoWhileStatement { .. }
            | NodeData::LabeledStatement { .. }
            | NodeData::BreakStatement { .. }
            | NodeData::ContinueStatement { .. }
            | NodeData::ThrowStatement { .. }
            | NodeData::TryStatement { .. }
            | NodeData::CatchClause { .. }
            | NodeData::ImportDeclaration { .. }
            | NodeData::ImportSpecifier { .. }
            | NodeData::ImportDefaultSpecifier { .. }
            | NodeData::ImportNamespaceSpecifier { .. }
            | NodeData::ExportNamedDeclaration { .. }
            | NodeData::ExportSpecifier { .. }
            | NodeData::ExportDefaultDeclaration { .. }
            | NodeData::VariableDeclarator { .. } => self.emit_statement(index, data),
            _ => self.emit_expression(data),
        }
    }

    // =========================================================================
    // Output helpers
    // =========================================================================

    pub(super) fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub(super) fn write_space(&mut self) {
        self.output.push(' ');
    }

    pub(super) fn write_line(&mut self) {
        self.output.push('\n');
    }

    /// Emit `items` separated by `, `.
    pub(super) fn emit_comma_list(&mut self, items: &[NodeIndex]) {
        for (position, &item) in items.iter().enumerate() {
            if position > 0 {
                self.write(", ");
            }
            self.emit(item);
        }
    }

    pub(super) fn emit_property_key(&mut self, key: &PropertyKey) {
        match key {
            PropertyKey::Identifier(text) | PropertyKey::String(text) | PropertyKey::Numeric(text) => {
                self.write(text);
            }
            PropertyKey::Computed(expression) => {
                self.write("[");
                self.emit(*expression);
                self.write("]");
            }
        }
    }

    /// `(params) body` of a function or method.
    pub(super) fn emit_function_rest(&mut self, params: &[NodeIndex], body: NodeIndex) {
        self.write("(");
        self.emit_comma_list(params);
        self.write(") ");
        self.emit(body);
    }
}
