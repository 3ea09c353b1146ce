//! Record extraction from a parsed module.

use std::ops::Range;

use rustpython_parser::ast::{self, Constant, Expr, Ranged, Stmt};
use schemabridge_core::{
    ExtractionError, FieldDefault, FieldSpec, SchemaRegistry, SchemaResult, SchemaSpec,
    TypeExpr, TypeParseError,
};
use tracing::debug;

use crate::parse::{line_column, parse_expression, parse_module};

/// Base class that marks a record unless configured otherwise.
pub const DEFAULT_BASE_CLASS: &str = "BaseModel";

/// `Field(...)` keywords kept as descriptive constraints.
const CONSTRAINT_KEYWORDS: &[&str] = &[
    "ge",
    "le",
    "gt",
    "lt",
    "min_length",
    "max_length",
    "multiple_of",
];

/// Decorators that turn a method into a computed accessor.
const ACCESSOR_DECORATORS: &[&str] = &["property", "cached_property", "computed_field"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Classes listing this name (bare or dotted) among their bases are records.
    pub base_class: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            base_class: DEFAULT_BASE_CLASS.to_string(),
        }
    }
}

impl ExtractOptions {
    pub fn with_base_class(mut self, base_class: impl Into<String>) -> Self {
        self.base_class = base_class.into();
        self
    }
}

/// Extract every record declared in `source`.
///
/// Classes are found at any depth, including under `if`, `try` and `with`
/// blocks. Extraction is all-or-nothing: the first error aborts and no
/// registry is returned.
pub fn extract_source(source: &str, options: &ExtractOptions) -> SchemaResult<SchemaRegistry> {
    let suite = parse_module(source)?;

    let mut classes = Vec::new();
    collect_classes(&suite, &mut classes);

    let extractor = Extractor { source };
    let mut schemas = Vec::new();
    for class in classes {
        if is_record(class, &options.base_class) {
            schemas.push(extractor.record(class)?);
        } else {
            let (line, _) = line_column(source, usize::from(class.range.start()));
            debug!(class = %class.name.as_str(), line, "skipping class without record base");
        }
    }

    SchemaRegistry::from_schemas(schemas)
}

/// Depth-first walk in source order; a class precedes the classes nested in it.
fn collect_classes<'m>(body: &'m [Stmt], out: &mut Vec<&'m ast::StmtClassDef>) {
    for stmt in body {
        if let Stmt::ClassDef(class) = stmt {
            out.push(class);
        }
        for block in nested_blocks(stmt) {
            collect_classes(block, out);
        }
    }
}

/// Statement blocks directly nested in `stmt`.
fn nested_blocks(stmt: &Stmt) -> Vec<&[Stmt]> {
    match stmt {
        Stmt::ClassDef(class) => vec![class.body.as_slice()],
        Stmt::FunctionDef(function) => vec![function.body.as_slice()],
        Stmt::AsyncFunctionDef(function) => vec![function.body.as_slice()],
        Stmt::If(branch) => vec![branch.body.as_slice(), branch.orelse.as_slice()],
        Stmt::For(each) => vec![each.body.as_slice(), each.orelse.as_slice()],
        Stmt::AsyncFor(each) => vec![each.body.as_slice(), each.orelse.as_slice()],
        Stmt::While(each) => vec![each.body.as_slice(), each.orelse.as_slice()],
        Stmt::With(with) => vec![with.body.as_slice()],
        Stmt::AsyncWith(with) => vec![with.body.as_slice()],
        Stmt::Try(attempt) => {
            try_blocks(&attempt.body, &attempt.handlers, &attempt.orelse, &attempt.finalbody)
        }
        Stmt::TryStar(attempt) => {
            try_blocks(&attempt.body, &attempt.handlers, &attempt.orelse, &attempt.finalbody)
        }
        Stmt::Match(matched) => matched
            .cases
            .iter()
            .map(|case| case.body.as_slice())
            .collect(),
        _ => Vec::new(),
    }
}

fn try_blocks<'s>(
    body: &'s [Stmt],
    handlers: &'s [ast::ExceptHandler],
    orelse: &'s [Stmt],
    finalbody: &'s [Stmt],
) -> Vec<&'s [Stmt]> {
    let mut blocks = vec![body];
    blocks.extend(handlers.iter().map(|handler| match handler {
        ast::ExceptHandler::ExceptHandler(handler) => handler.body.as_slice(),
    }));
    blocks.push(orelse);
    blocks.push(finalbody);
    blocks
}

fn is_record(class: &ast::StmtClassDef, base_class: &str) -> bool {
    class
        .bases
        .iter()
        .any(|base| tail_name(base) == Some(base_class))
}

struct Extractor<'s> {
    source: &'s str,
}

impl Extractor<'_> {
    fn record(&self, class: &ast::StmtClassDef) -> SchemaResult<SchemaSpec> {
        let name = class.name.as_str();
        let docstring = docstring(&class.body)
            .map(clean_docstring)
            .unwrap_or_default();
        let mut schema = SchemaSpec::new(name).with_docstring(docstring);

        for stmt in &class.body {
            match stmt {
                Stmt::Assign(assign)
                    if assign
                        .targets
                        .iter()
                        .any(|target| name_of(target) == Some("model_config")) =>
                {
                    if let Some(frozen) = self.config_frozen(name, &assign.value)? {
                        schema.is_frozen = frozen;
                    }
                }
                Stmt::AnnAssign(assign) if name_of(&assign.target) == Some("model_config") => {
                    if let Some(value) = &assign.value
                        && let Some(frozen) = self.config_frozen(name, value)?
                    {
                        schema.is_frozen = frozen;
                    }
                }
                Stmt::ClassDef(inner) if inner.name.as_str() == "Config" => {
                    if let Some(frozen) = self.legacy_config_frozen(name, inner)? {
                        schema.is_frozen = frozen;
                    }
                }
                Stmt::FunctionDef(function)
                    if function.decorator_list.iter().any(is_accessor_decorator) =>
                {
                    schema.has_computed_accessors = true;
                }
                Stmt::AsyncFunctionDef(function)
                    if function.decorator_list.iter().any(is_accessor_decorator) =>
                {
                    schema.has_computed_accessors = true;
                }
                Stmt::AnnAssign(assign) => {
                    if let Some(target) = field_target(assign) {
                        let field = self.field(name, target, assign)?;
                        schema.fields.push(field);
                    }
                }
                _ => {}
            }
        }

        debug!(
            record = %schema.name,
            fields = schema.fields.len(),
            frozen = schema.is_frozen,
            "extracted record"
        );
        Ok(schema)
    }

    /// Read `frozen` from a `model_config` value.
    fn config_frozen(&self, record: &str, value: &Expr) -> SchemaResult<Option<bool>> {
        let ambiguous = |message: &str| ExtractionError::AmbiguousConfig {
            record: record.to_string(),
            message: message.to_string(),
        };

        match value {
            Expr::Call(call) if matches!(tail_name(&call.func), Some("ConfigDict" | "dict")) => {
                let explicit = call
                    .keywords
                    .iter()
                    .rev()
                    .find(|keyword| keyword_name(keyword) == Some("frozen"));
                match explicit {
                    Some(keyword) => self.literal_bool(record, &keyword.value).map(Some),
                    None if call.keywords.iter().any(|keyword| keyword.arg.is_none()) => Err(
                        ambiguous("cannot determine `frozen` through `**` expansion"),
                    ),
                    None => Ok(None),
                }
            }
            Expr::Dict(dict) => {
                let explicit = dict
                    .keys
                    .iter()
                    .zip(&dict.values)
                    .rev()
                    .find(|(key, _)| key.as_ref().and_then(string_literal) == Some("frozen"));
                match explicit {
                    Some((_, value)) => self.literal_bool(record, value).map(Some),
                    None if dict.keys.iter().any(Option::is_none) => Err(ambiguous(
                        "cannot determine `frozen` through `**` expansion",
                    )),
                    None => Ok(None),
                }
            }
            _ if self.text(value).contains("frozen") => Err(ambiguous(
                "`model_config` must be a ConfigDict(...) call or a dict literal to read `frozen`",
            )),
            _ => Ok(None),
        }
    }

    /// `frozen = ...` inside a nested `class Config:`.
    fn legacy_config_frozen(
        &self,
        record: &str,
        config: &ast::StmtClassDef,
    ) -> SchemaResult<Option<bool>> {
        let mut frozen = None;
        for stmt in &config.body {
            let value = match stmt {
                Stmt::Assign(assign)
                    if assign
                        .targets
                        .iter()
                        .any(|target| name_of(target) == Some("frozen")) =>
                {
                    &assign.value
                }
                Stmt::AnnAssign(ast::StmtAnnAssign {
                    target,
                    value: Some(value),
                    ..
                }) if name_of(target) == Some("frozen") => value,
                _ => continue,
            };
            frozen = Some(self.literal_bool(record, value)?);
        }
        Ok(frozen)
    }

    fn literal_bool(&self, record: &str, value: &Expr) -> SchemaResult<bool> {
        match value {
            Expr::Constant(ast::ExprConstant {
                value: Constant::Bool(flag),
                ..
            }) => Ok(*flag),
            _ => Err(ExtractionError::AmbiguousConfig {
                record: record.to_string(),
                message: format!(
                    "`frozen` must be the literal True or False, found `{}`",
                    self.text(value)
                ),
            }),
        }
    }

    fn field(
        &self,
        record: &str,
        target: &str,
        assign: &ast::StmtAnnAssign,
    ) -> SchemaResult<FieldSpec> {
        let invalid = |source: TypeParseError| ExtractionError::InvalidType {
            record: record.to_string(),
            field: target.to_string(),
            source,
        };

        let annotation = annotation_text(&assign.annotation, self.source).map_err(|reason| {
            invalid(TypeParseError::new(self.text(&assign.annotation), reason))
        })?;
        let ty = TypeExpr::parse(&annotation).map_err(invalid)?;
        let field = FieldSpec::new(target, ty);

        match assign.value.as_deref() {
            Some(Expr::Call(call)) if tail_name(&call.func) == Some("Field") => {
                self.field_metadata(record, field, &call.args, &call.keywords)
            }
            Some(value) => Ok(field.with_default(FieldDefault::Literal(self.text(value)))),
            None => Ok(field),
        }
    }

    fn field_metadata(
        &self,
        record: &str,
        mut field: FieldSpec,
        args: &[Expr],
        keywords: &[ast::Keyword],
    ) -> SchemaResult<FieldSpec> {
        let name = field.name.clone();
        let malformed = |message: String| ExtractionError::MalformedField {
            record: record.to_string(),
            field: name.clone(),
            message,
        };

        if args.iter().any(|arg| matches!(arg, Expr::Starred(_)))
            || keywords.iter().any(|keyword| keyword.arg.is_none())
        {
            return Err(malformed(
                "cannot read metadata through `*` or `**` arguments".to_string(),
            ));
        }
        if args.len() > 1 {
            return Err(malformed(format!(
                "Field() takes at most one positional argument, found {}",
                args.len()
            )));
        }

        if let Some(first) = args.first()
            && !is_ellipsis(first)
        {
            field.default = Some(FieldDefault::Literal(self.text(first)));
        }

        for keyword in keywords {
            let Some(arg) = keyword_name(keyword) else {
                continue;
            };
            match arg {
                "description" => match string_literal(&keyword.value) {
                    Some(text) => field.description = text.to_string(),
                    None => {
                        return Err(malformed(format!(
                            "`description` must be a string literal, found `{}`",
                            self.text(&keyword.value)
                        )));
                    }
                },
                "default" => {
                    if !args.is_empty() {
                        return Err(malformed(
                            "default is given both positionally and by keyword".to_string(),
                        ));
                    }
                    if field.default.is_some() {
                        return Err(malformed(
                            "cannot combine `default` with `default_factory`".to_string(),
                        ));
                    }
                    if !is_ellipsis(&keyword.value) {
                        field.default = Some(FieldDefault::Literal(self.text(&keyword.value)));
                    }
                }
                "default_factory" => {
                    if field.default.is_some() {
                        return Err(malformed(
                            "cannot combine `default` with `default_factory`".to_string(),
                        ));
                    }
                    field.default = Some(FieldDefault::Factory(self.text(&keyword.value)));
                }
                constraint if CONSTRAINT_KEYWORDS.contains(&constraint) => {
                    field
                        .constraints
                        .insert(constraint.to_string(), self.text(&keyword.value));
                }
                _ => {}
            }
        }

        Ok(field)
    }

    /// Literal source text of an expression.
    fn text(&self, expr: &Expr) -> String {
        source_text(self.source, expr).to_string()
    }
}

fn source_text<'s>(source: &'s str, expr: &Expr) -> &'s str {
    source
        .get(Range::<usize>::from(expr.range()))
        .unwrap_or_default()
}

fn docstring(body: &[Stmt]) -> Option<&str> {
    match body.first()? {
        Stmt::Expr(statement) => string_literal(&statement.value),
        _ => None,
    }
}

fn string_literal(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Constant(ast::ExprConstant {
            value: Constant::Str(text),
            ..
        }) => Some(text),
        _ => None,
    }
}

fn is_ellipsis(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Constant(ast::ExprConstant {
            value: Constant::Ellipsis,
            ..
        })
    )
}

fn name_of(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Name(name) => Some(name.id.as_str()),
        _ => None,
    }
}

/// Last segment of a bare or dotted name.
fn tail_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Name(name) => Some(name.id.as_str()),
        Expr::Attribute(attribute) => Some(attribute.attr.as_str()),
        _ => None,
    }
}

fn keyword_name(keyword: &ast::Keyword) -> Option<&str> {
    keyword.arg.as_ref().map(|arg| arg.as_str())
}

fn is_accessor_decorator(decorator: &Expr) -> bool {
    let target = match decorator {
        Expr::Call(call) => call.func.as_ref(),
        _ => decorator,
    };
    tail_name(target).is_some_and(|name| ACCESSOR_DECORATORS.contains(&name))
}

/// Field name of an annotated assignment, unless it is configuration,
/// private or a class variable.
fn field_target(assign: &ast::StmtAnnAssign) -> Option<&str> {
    let target = name_of(&assign.target)?;
    let is_field = target != "model_config"
        && !target.starts_with('_')
        && !is_class_var(&assign.annotation);
    is_field.then_some(target)
}

fn is_class_var(annotation: &Expr) -> bool {
    let head = match annotation {
        Expr::Subscript(subscript) => subscript.value.as_ref(),
        _ => annotation,
    };
    tail_name(head) == Some("ClassVar")
}

/// Canonical annotation text with string forward references resolved.
fn annotation_text(annotation: &Expr, source: &str) -> Result<String, String> {
    match annotation {
        Expr::Constant(ast::ExprConstant {
            value: Constant::Str(text),
            ..
        }) => {
            let inner = parse_expression(text).map_err(|err| err.to_string())?;
            annotation_text(&inner, text)
        }
        Expr::Subscript(subscript) => Ok(format!(
            "{}[{}]",
            annotation_text(&subscript.value, source)?,
            annotation_text(&subscript.slice, source)?
        )),
        Expr::Tuple(tuple) => {
            let parts = tuple
                .elts
                .iter()
                .map(|item| annotation_text(item, source))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(parts.join(", "))
        }
        Expr::BinOp(ast::ExprBinOp {
            left,
            op: ast::Operator::BitOr,
            right,
            ..
        }) => Ok(format!(
            "{} | {}",
            annotation_text(left, source)?,
            annotation_text(right, source)?
        )),
        _ => Ok(source_text(source, annotation).to_string()),
    }
}

/// Normalize a docstring the way `inspect.cleandoc` does.
pub fn clean_docstring(raw: &str) -> String {
    let expanded = raw.replace('\t', "        ");
    let lines: Vec<&str> = expanded.lines().collect();
    let Some((first, rest)) = lines.split_first() else {
        return String::new();
    };

    let margin = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned = Vec::with_capacity(lines.len());
    cleaned.push(first.trim_start());
    cleaned.extend(rest.iter().map(|line| line.get(margin..).unwrap_or_default()));

    while cleaned.first().is_some_and(|line| line.trim().is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|line| line.trim().is_empty()) {
        cleaned.pop();
    }

    cleaned.join("\n")
}
