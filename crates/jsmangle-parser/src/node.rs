//! Node definitions for the arena syntax tree.
//!
//! Every node kind is a variant of the closed `NodeData` enum, so adding a kind
//! forces each exhaustive match (child enumeration, classification, printing,
//! binding) to be revisited.
//!
//! Property keys, member property names, import/export external names and
//! module sources are plain strings. The only `Identifier` nodes in a tree are
//! binding identifiers, references, and label operands.

use crate::base::NodeIndex;
use smallvec::SmallVec;

/// Whether a program is parsed as an ES module or a classic script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceType {
    #[default]
    Module,
    Script,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Get,
    Set,
}

/// How an object literal property was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    /// `key: value` or shorthand `key`.
    Init,
    /// Method syntax; `value` is a `FunctionExpression`.
    Method,
    Get,
    Set,
}

/// Key of an object property or class member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyKey {
    Identifier(String),
    /// Raw string literal, quotes included.
    String(String),
    /// Raw numeric literal.
    Numeric(String),
    Computed(NodeIndex),
}

/// Shared payload of function declarations and function expressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionData {
    /// `NONE` for anonymous functions.
    pub id: NodeIndex,
    pub params: Vec<NodeIndex>,
    /// Always a `BlockStatement`.
    pub body: NodeIndex,
}

/// Shared payload of class declarations and class expressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassData {
    pub id: NodeIndex,
    pub super_class: NodeIndex,
    pub members: Vec<NodeIndex>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Program {
        body: Vec<NodeIndex>,
        source_type: SourceType,
    },

    // =========================================================================
    // Statements and declarations
    // =========================================================================
    VariableDeclaration {
        kind: VarKind,
        declarations: Vec<NodeIndex>,
    },
    VariableDeclarator {
        id: NodeIndex,
        init: NodeIndex,
    },
    FunctionDeclaration(FunctionData),
    ClassDeclaration(ClassData),
    ExpressionStatement {
        expression: NodeIndex,
    },
    BlockStatement {
        body: Vec<NodeIndex>,
    },
    EmptyStatement,
    ReturnStatement {
        argument: NodeIndex,
    },
    IfStatement {
        test: NodeIndex,
        consequent: NodeIndex,
        alternate: NodeIndex,
    },
    ForStatement {
        init: NodeIndex,
        test: NodeIndex,
        update: NodeIndex,
        body: NodeIndex,
    },
    /// `for (left in right)` or, with `is_of`, `for (left of right)`.
    ForInStatement {
        left: NodeIndex,
        right: NodeIndex,
        body: NodeIndex,
        is_of: bool,
    },
    WhileStatement {
        test: NodeIndex,
        body: NodeIndex,
    },
    DoWhileStatement {
        body: NodeIndex,
        test: NodeIndex,
    },
    LabeledStatement {
        label: NodeIndex,
        body: NodeIndex,
    },
    BreakStatement {
        label: NodeIndex,
    },
    ContinueStatement {
        label: NodeIndex,
    },
    ThrowStatement {
        argument: NodeIndex,
    },
    TryStatement {
        block: NodeIndex,
        handler: NodeIndex,
        finalizer: NodeIndex,
    },
    CatchClause {
        param: NodeIndex,
        body: NodeIndex,
    },

    // =========================================================================
    // Modules
    // =========================================================================
    ImportDeclaration {
        specifiers: Vec<NodeIndex>,
        /// Raw string literal, quotes included.
        source: String,
    },
    ImportSpecifier {
        imported: String,
        local: NodeIndex,
    },
    ImportDefaultSpecifier {
        local: NodeIndex,
    },
    ImportNamespaceSpecifier {
        local: NodeIndex,
    },
    ExportNamedDeclaration {
        declaration: NodeIndex,
        specifiers: Vec<NodeIndex>,
        source: Option<String>,
    },
    ExportSpecifier {
        local: NodeIndex,
        exported: String,
    },
    ExportDefaultDeclaration {
        declaration: NodeIndex,
    },

    // =========================================================================
    // Expressions
    // =========================================================================
    Identifier {
        name: String,
    },
    NumericLiteral {
        raw: String,
    },
    StringLiteral {
        raw: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    ThisExpression,
    /// Holes are `NONE`.
    ArrayExpression {
        elements: Vec<NodeIndex>,
    },
    ObjectExpression {
        properties: Vec<NodeIndex>,
    },
    /// Object literal or object pattern property.
    Property {
        key: PropertyKey,
        value: NodeIndex,
        shorthand: bool,
        kind: PropertyKind,
    },
    FunctionExpression(FunctionData),
    ArrowFunctionExpression {
        params: Vec<NodeIndex>,
        body: NodeIndex,
        /// Body is an expression rather than a block.
        expression: bool,
    },
    ClassExpression(ClassData),
    /// `value` is an anonymous `FunctionExpression`.
    ClassMethod {
        key: PropertyKey,
        kind: MethodKind,
        is_static: bool,
        value: NodeIndex,
    },
    MemberExpression {
        object: NodeIndex,
        property: String,
        optional: bool,
    },
    ComputedMemberExpression {
        object: NodeIndex,
        property: NodeIndex,
        optional: bool,
    },
    CallExpression {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
        optional: bool,
    },
    NewExpression {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    UnaryExpression {
        operator: String,
        argument: NodeIndex,
    },
    UpdateExpression {
        operator: String,
        prefix: bool,
        argument: NodeIndex,
    },
    /// Arithmetic, comparison and logical operators.
    BinaryExpression {
        operator: String,
        left: NodeIndex,
        right: NodeIndex,
    },
    AssignmentExpression {
        operator: String,
        left: NodeIndex,
        right: NodeIndex,
    },
    ConditionalExpression {
        test: NodeIndex,
        consequent: NodeIndex,
        alternate: NodeIndex,
    },
    SequenceExpression {
        expressions: Vec<NodeIndex>,
    },
    ParenthesizedExpression {
        expression: NodeIndex,
    },
    SpreadElement {
        argument: NodeIndex,
    },

    // =========================================================================
    // Patterns
    // =========================================================================
    ObjectPattern {
        properties: Vec<NodeIndex>,
    },
    /// Holes are `NONE`.
    ArrayPattern {
        elements: Vec<NodeIndex>,
    },
    AssignmentPattern {
        left: NodeIndex,
        right: NodeIndex,
    },
    RestElement {
        argument: NodeIndex,
    },
}

pub type ChildList = SmallVec<[NodeIndex; 4]>;

macro_rules! push_some {
    ($out:ident, $($idx:expr),+ $(,)?) => {{
        $(if $idx.is_some() {
            $out.push($idx);
        })+
    }};
}

impl NodeData {
    /// Direct children in source order, skipping absent slots.
    pub fn children(&self) -> ChildList {
        let mut out = ChildList::new();
        match self {
            NodeData::Program { body, .. } | NodeData::BlockStatement { body } => {
                out.extend(body.iter().copied());
            }
            NodeData::VariableDeclaration { declarations, .. } => {
                out.extend(declarations.iter().copied());
            }
            NodeData::VariableDeclarator { id, init } => push_some!(out, *id, *init),
            NodeData::FunctionDeclaration(func) | NodeData::FunctionExpression(func) => {
                push_some!(out, func.id);
                out.extend(func.params.iter().copied());
                push_some!(out, func.body);
            }
            NodeData::ClassDeclaration(class) | NodeData::ClassExpression(class) => {
                push_some!(out, class.id, class.super_class);
                out.extend(class.members.iter().copied());
            }
            NodeData::ExpressionStatement { expression } => push_some!(out, *expression),
            NodeData::EmptyStatement
            | NodeData::NumericLiteral { .. }
            | NodeData::StringLiteral { .. }
            | NodeData::BooleanLiteral { .. }
            | NodeData::NullLiteral
            | NodeData::ThisExpression
            | NodeData::Identifier { .. } => {}
            NodeData::ReturnStatement { argument }
            | NodeData::ThrowStatement { argument }
            | NodeData::SpreadElement { argument }
            | NodeData::RestElement { argument }
            | NodeData::UnaryExpression { argument, .. }
            | NodeData::UpdateExpression { argument, .. } => push_some!(out, *argument),
            NodeData::IfStatement {
                test,
                consequent,
                alternate,
            }
            | NodeData::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => push_some!(out, *test, *consequent, *alternate),
            NodeData::ForStatement {
                init,
                test,
                update,
                body,
            } => push_some!(out, *init, *test, *update, *body),
            NodeData::ForInStatement {
                left, right, body, ..
            } => push_some!(out, *left, *right, *body),
            NodeData::WhileStatement { test, body } => push_some!(out, *test, *body),
            NodeData::DoWhileStatement { body, test } => push_some!(out, *body, *test),
            NodeData::LabeledStatement { label, body } => push_some!(out, *label, *body),
            NodeData::BreakStatement { label } | NodeData::ContinueStatement { label } => {
                push_some!(out, *label);
            }
            NodeData::TryStatement {
                block,
                handler,
                finalizer,
            } => push_some!(out, *block, *handler, *finalizer),
            NodeData::CatchClause { param, body } => push_some!(out, *param, *body),
            NodeData::ImportDeclaration { specifiers, .. } => {
                out.extend(specifiers.iter().copied());
            }
            NodeData::ImportSpecifier { local, .. }
            | NodeData::ImportDefaultSpecifier { local }
            | NodeData::ImportNamespaceSpecifier { local }
            | NodeData::ExportSpecifier { local, .. } => push_some!(out, *local),
            NodeData::ExportNamedDeclaration {
                declaration,
                specifiers,
                ..
            } => {
                push_some!(out, *declaration);
                out.extend(specifiers.iter().copied());
            }
            NodeData::ExportDefaultDeclaration { declaration } => push_some!(out, *declaration),
            NodeData::ArrayExpression { elements } | NodeData::ArrayPattern { elements } => {
                out.extend(elements.iter().copied().filter(|e| e.is_some()));
            }
            NodeData::ObjectExpression { properties } | NodeData::ObjectPattern { properties } => {
                out.extend(properties.iter().copied());
            }
            NodeData::Property { key, value, .. } | NodeData::ClassMethod { key, value, .. } => {
                if let PropertyKey::Computed(expr) = key {
                    push_some!(out, *expr);
                }
                push_some!(out, *value);
            }
            NodeData::ArrowFunctionExpression { params, body, .. } => {
                out.extend(params.iter().copied());
                push_some!(out, *body);
            }
            NodeData::MemberExpression { object, .. } => push_some!(out, *object),
            NodeData::ComputedMemberExpression {
                object, property, ..
            } => push_some!(out, *object, *property),
            NodeData::CallExpression {
                callee, arguments, ..
            }
            | NodeData::NewExpression { callee, arguments } => {
                push_some!(out, *callee);
                out.extend(arguments.iter().copied());
            }
            NodeData::BinaryExpression { left, right, .. }
            | NodeData::AssignmentExpression { left, right, .. }
            | NodeData::AssignmentPattern { left, right } => push_some!(out, *left, *right),
            NodeData::SequenceExpression { expressions } => {
                out.extend(expressions.iter().copied());
            }
            NodeData::ParenthesizedExpression { expression } => push_some!(out, *expression),
        }
        out
    }

    /// Replace every slot holding `old` with `new`. Returns whether a slot matched.
    pub fn replace_child(&mut self, old: NodeIndex, new: NodeIndex) -> bool {
        let mut replaced = false;
        let mut swap = |slot: &mut NodeIndex| {
            if *slot == old {
                *slot = new;
                replaced = true;
            }
        };
        match self {
            NodeData::Program { body, .. } | NodeData::BlockStatement { body } => {
                body.iter_mut().for_each(&mut swap);
            }
            NodeData::VariableDeclaration { declarations, .. } => {
                declarations.iter_mut().for_each(&mut swap);
            }
            NodeData::VariableDeclarator { id, init } => {
                swap(id);
                swap(init);
            }
            NodeData::FunctionDeclaration(func) | NodeData::FunctionExpression(func) => {
                swap(&mut func.id);
                func.params.iter_mut().for_each(&mut swap);
                swap(&mut func.body);
            }
            NodeData::ClassDeclaration(class) | NodeData::ClassExpression(class) => {
                swap(&mut class.id);
                swap(&mut class.super_class);
                class.members.iter_mut().for_each(&mut swap);
            }
            NodeData::ExpressionStatement { expression } => swap(expression),
            NodeData::EmptyStatement
            | NodeData::NumericLiteral { .. }
            | NodeData::StringLiteral { .. }
            | NodeData::BooleanLiteral { .. }
            | NodeData::NullLiteral
            | NodeData::ThisExpression
            | NodeData::Identifier { .. } => {}
            NodeData::ReturnStatement { argument }
            | NodeData::ThrowStatement { argument }
            | NodeData::SpreadElement { argument }
            | NodeData::RestElement { argument }
            | NodeData::UnaryExpression { argument, .. }
            | NodeData::UpdateExpression { argument, .. } => swap(argument),
            NodeData::IfStatement {
                test,
                consequent,
                alternate,
            }
            | NodeData::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                swap(test);
                swap(consequent);
                swap(alternate);
            }
            NodeData::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                swap(init);
                swap(test);
                swap(update);
                swap(body);
            }
            NodeData::ForInStatement {
                left, right, body, ..
            } => {
                swap(left);
                swap(right);
                swap(body);
            }
            NodeData::WhileStatement { test, body } | NodeData::DoWhileStatement { body, test } => {
                swap(test);
                swap(body);
            }
            NodeData::LabeledStatement { label, body } => {
                swap(label);
                swap(body);
            }
            NodeData::BreakStatement { label } | NodeData::ContinueStatement { label } => {
                swap(label);
            }
            NodeData::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                swap(block);
                swap(handler);
                swap(finalizer);
            }
            NodeData::CatchClause { param, body } => {
                swap(param);
                swap(body);
            }
            NodeData::ImportDeclaration { specifiers, .. } => {
                specifiers.iter_mut().for_each(&mut swap);
            }
            NodeData::ImportSpecifier { local, .. }
            | NodeData::ImportDefaultSpecifier { local }
            | NodeData::ImportNamespaceSpecifier { local }
            | NodeData::ExportSpecifier { local, .. } => swap(local),
            NodeData::ExportNamedDeclaration {
                declaration,
                specifiers,
                ..
            } => {
                swap(declaration);
                specifiers.iter_mut().for_each(&mut swap);
            }
            NodeData::ExportDefaultDeclaration { declaration } => swap(declaration),
            NodeData::ArrayExpression { elements } | NodeData::ArrayPattern { elements } => {
                elements.iter_mut().for_each(&mut swap);
            }
            NodeData::ObjectExpression { properties } | NodeData::ObjectPattern { properties } => {
                properties.iter_mut().for_each(&mut swap);
            }
            NodeData::Property { key, value, .. } | NodeData::ClassMethod { key, value, .. } => {
                if let PropertyKey::Computed(expr) = key {
                    swap(expr);
                }
                swap(value);
            }
            NodeData::ArrowFunctionExpression { params, body, .. } => {
                params.iter_mut().for_each(&mut swap);
                swap(body);
            }
            NodeData::MemberExpression { object, .. } => swap(object),
            NodeData::ComputedMemberExpression {
                object, property, ..
            } => {
                swap(object);
                swap(property);
            }
            NodeData::CallExpression {
                callee, arguments, ..
            }
            | NodeData::NewExpression { callee, arguments } => {
                swap(callee);
                arguments.iter_mut().for_each(&mut swap);
            }
            NodeData::BinaryExpression { left, right, .. }
            | NodeData::AssignmentExpression { left, right, .. }
            | NodeData::AssignmentPattern { left, right } => {
                swap(left);
                swap(right);
            }
            NodeData::SequenceExpression { expressions } => {
                expressions.iter_mut().for_each(&mut swap);
            }
            NodeData::ParenthesizedExpression { expression } => swap(expression),
        }
        replaced
    }

    /// Statement list of a program or block.
    pub fn statement_list(&self) -> Option<&Vec<NodeIndex>> {
        match self {
            NodeData::Program { body, .. } | NodeData::BlockStatement { body } => Some(body),
            _ => None,
        }
    }

    pub fn statement_list_mut(&mut self) -> Option<&mut Vec<NodeIndex>> {
        match self {
            NodeData::Program { body, .. } | NodeData::BlockStatement { body } => Some(body),
            _ => None,
        }
    }

    /// Short kind name, used in logs and diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            NodeData::Program { .. } => "Program",
            NodeData::VariableDeclaration { .. } => "VariableDeclaration",
            NodeData::VariableDeclarator { .. } => "VariableDeclarator",
            NodeData::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeData::ClassDeclaration(_) => "ClassDeclaration",
            NodeData::ExpressionStatement { .. } => "ExpressionStatement",
            NodeData::BlockStatement { .. } => "BlockStatement",
            NodeData::EmptyStatement => "EmptyStatement",
            NodeData::ReturnStatement { .. } => "ReturnStatement",
            NodeData::IfStatement { .. } => "IfStatement",
            NodeData::ForStatement { .. } => "ForStatement",
            NodeData::ForInStatement { .. } => "ForInStatement",
            NodeData::WhileStatement { .. } => "WhileStatement",
            NodeData::DoWhileStatement { .. } => "DoWhileStatement",
            NodeData::LabeledStatement { .. } => "LabeledStatement",
            NodeData::BreakStatement { .. } => "BreakStatement",
            NodeData::ContinueStatement { .. } => "ContinueStatement",
            NodeData::ThrowStatement { .. } => "ThrowStatement",
            NodeData::TryStatement { .. } => "TryStatement",
            NodeData::CatchClause { .. } => "CatchClause",
            NodeData::ImportDeclaration { .. } => "ImportDeclaration",
            NodeData::ImportSpecifier { .. } => "ImportSpecifier",
            NodeData::ImportDefaultSpecifier { .. } => "ImportDefaultSpecifier",
            NodeData::ImportNamespaceSpecifier { .. } => "ImportNamespaceSpecifier",
            NodeData::ExportNamedDeclaration { .. } => "ExportNamedDeclaration",
            NodeData::ExportSpecifier { .. } => "ExportSpecifier",
            NodeData::ExportDefaultDeclaration { .. } => "ExportDefaultDeclaration",
            NodeData::Identifier { .. } => "Identifier",
            NodeData::NumericLiteral { .. } => "NumericLiteral",
            NodeData::StringLiteral { .. } => "StringLiteral",
            NodeData::BooleanLiteral { .. } => "BooleanLiteral",
            NodeData::NullLiteral => "NullLiteral",
            NodeData::ThisExpression => "ThisExpression",
            NodeData::ArrayExpression { .. } => "ArrayExpression",
            NodeData::ObjectExpression { .. } => "ObjectExpression",
            NodeData::Property { .. } => "Property",
            NodeData::FunctionExpression(_) => "FunctionExpression",
            NodeData::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            NodeData::ClassExpression(_) => "ClassExpression",
            NodeData::ClassMethod { .. } => "ClassMethod",
            NodeData::MemberExpression { .. } => "MemberExpression",
            NodeData::ComputedMemberExpression { .. } => "ComputedMemberExpression",
            NodeData::CallExpression { .. } => "CallExpression",
            NodeData::NewExpression { .. } => "NewExpression",
            NodeData::UnaryExpression { .. } => "UnaryExpression",
            NodeData::UpdateExpression { .. } => "UpdateExpression",
            NodeData::BinaryExpression { .. } => "BinaryExpression",
            NodeData::AssignmentExpression { .. } => "AssignmentExpression",
            NodeData::ConditionalExpression { .. } => "ConditionalExpression",
            NodeData::SequenceExpression { .. } => "SequenceExpression",
            NodeData::ParenthesizedExpression { .. } => "ParenthesizedExpression",
            NodeData::SpreadElement { .. } => "SpreadElement",
            NodeData::ObjectPattern { .. } => "ObjectPattern",
            NodeData::ArrayPattern { .. } => "ArrayPattern",
            NodeData::AssignmentPattern { .. } => "AssignmentPattern",
            NodeData::RestElement { .. } => "RestElement",
        }
    }
}

/// A node in the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub data: NodeData,
    /// `NONE` for the root and for detached nodes.
    pub parent: NodeIndex,
    /// Ordering priority used when hoisting statements within a block;
    /// unmarked statements count as priority 1.
    pub block_hoist: Option<u8>,
}

/// Arena owning every node of one program.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
}
