//! Evaluation entry points and expression dispatch

use crate::path::{
    Params,
    ast::{Closure, Expression, Step},
    compiler::CompiledPath,
    error::{PathError, PathResult},
};
use crate::value::PathValue;
use crate::xml::Node;

use super::{navigation, operators};

/// Evaluation state for one expression: the document root and the variables in scope
pub(crate) struct Context<'c> {
    pub(crate) root: &'c PathValue,
    /// The root is an XML document element that the first step may name
    pub(crate) document: bool,
    pub(crate) bindings: Vec<(String, PathValue)>,
}

impl Context<'_> {
    fn lookup(&self, name: &str) -> Option<&PathValue> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| value)
    }
}

/// Evaluates compiled paths against a root value
pub struct Evaluator<'a> {
    params: &'a Params,
}

impl<'a> Evaluator<'a> {
    #[inline]
    #[must_use]
    pub fn new(params: &'a Params) -> Self {
        Self { params }
    }

    /// Evaluate `path` with `root` as the document
    ///
    /// # Errors
    /// Returns `MissingProperty` when a property is read from a scalar (callers
    /// treat that as a null result), `UndefinedParameter` for unknown
    /// identifiers and `Evaluation` for unsupported methods or operands.
    pub fn evaluate(&self, path: &CompiledPath, root: &PathValue) -> PathResult<PathValue> {
        let ctx = Context {
            root,
            document: false,
            bindings: Vec::new(),
        };
        self.eval(path.expression(), &ctx)
    }

    /// Evaluate `path` against an XML document whose root element may be named by the first step
    ///
    /// # Errors
    /// Same as [`Evaluator::evaluate`].
    pub fn evaluate_document(&self, path: &CompiledPath, root: &Node) -> PathResult<PathValue> {
        let root = PathValue::Node(root.clone());
        let ctx = Context {
            root: &root,
            document: true,
            bindings: Vec::new(),
        };
        self.eval(path.expression(), &ctx)
    }

    pub(crate) fn eval(&self, expression: &Expression, ctx: &Context<'_>) -> PathResult<PathValue> {
        match expression {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Root => Ok(ctx.root.clone()),
            Expression::Variable(name) => self.lookup(name, ctx),
            Expression::List(items) => items
                .iter()
                .map(|item| self.eval(item, ctx))
                .collect::<PathResult<Vec<_>>>()
                .map(PathValue::List),
            Expression::Path { base, steps } => self.eval_path(base, steps, ctx),
            Expression::Unary { operator, operand } => {
                let operand = self.eval(operand, ctx)?;
                operators::unary(*operator, &operand)
            }
            Expression::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.eval(left, ctx)?;
                let right = self.eval(right, ctx)?;
                operators::binary(*operator, &left, &right)
            }
            Expression::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.eval(left, ctx)?.truthy();
                let result = match operator {
                    crate::path::ast::LogicalOp::And => left && self.eval(right, ctx)?.truthy(),
                    crate::path::ast::LogicalOp::Or => left || self.eval(right, ctx)?.truthy(),
                };
                Ok(PathValue::Bool(result))
            }
        }
    }

    fn lookup(&self, name: &str, ctx: &Context<'_>) -> PathResult<PathValue> {
        if let Some(value) = ctx.lookup(name) {
            return Ok(value.clone());
        }
        self.params
            .get(name)
            .cloned()
            .ok_or_else(|| PathError::undefined_parameter(name))
    }

    fn eval_path(
        &self,
        base: &Expression,
        steps: &[Step],
        ctx: &Context<'_>,
    ) -> PathResult<PathValue> {
        let mut current = self.eval(base, ctx)?;
        let mut remaining = steps;

        // The root element's own name may open a document path: `shopping.category`
        if ctx.document && *base == Expression::Root {
            if let (Some(Step::Property(name)), PathValue::Node(root)) = (steps.first(), &current) {
                if root.matches_name(name) {
                    remaining = &steps[1..];
                }
            }
        }

        for step in remaining {
            tracing::trace!(target: "restcheck::path::eval", ?step, receiver = current.type_name(), "applying step");
            current = self.apply_step(current, step, ctx)?;
        }
        Ok(current)
    }

    pub(crate) fn apply_step(
        &self,
        current: PathValue,
        step: &Step,
        ctx: &Context<'_>,
    ) -> PathResult<PathValue> {
        match step {
            Step::Property(name) => navigation::property(current, name),
            Step::Attribute(name) => navigation::attribute(current, name),
            Step::Index(selectors) => {
                let mut keys = Vec::with_capacity(selectors.len());
                for selector in selectors {
                    keys.push(navigation::IndexKey::evaluate(selector, |e| self.eval(e, ctx))?);
                }
                navigation::index(current, &keys)
            }
            Step::DepthFirst => Ok(navigation::depth_first(current)),
            Step::Children => Ok(navigation::children(current)),
            Step::Method { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg, ctx))
                    .collect::<PathResult<Vec<_>>>()?;
                super::methods::call(current, name, &args)
            }
            Step::ClosureCall {
                name,
                args,
                closure,
            } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg, ctx))
                    .collect::<PathResult<Vec<_>>>()?;
                super::closures::call(self, current, name, &args, closure, ctx)
            }
            Step::Spread(inner) => match current {
                PathValue::Null => Ok(PathValue::Null),
                receiver => {
                    let members = navigation::members(receiver);
                    members
                        .into_iter()
                        .map(|member| self.apply_step(member, inner, ctx))
                        .collect::<PathResult<Vec<_>>>()
                        .map(PathValue::List)
                }
            },
        }
    }

    /// Run `closure` with `argument` bound to its parameter
    pub(crate) fn invoke(
        &self,
        closure: &Closure,
        argument: PathValue,
        ctx: &Context<'_>,
    ) -> PathResult<PathValue> {
        let mut bindings = ctx.bindings.clone();
        bindings.push((closure.param_name().to_string(), argument));
        let mut scope = Context {
            root: ctx.root,
            document: false,
            bindings,
        };
        for (name, expression) in &closure.locals {
            let value = self.eval(expression, &scope)?;
            scope.bindings.push((name.clone(), value));
        }
        self.eval(&closure.body, &scope)
    }
}
