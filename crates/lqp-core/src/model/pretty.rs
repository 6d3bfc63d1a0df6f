//! Human-readable text dump of a problem.
//!
//! ```text
//! Maximize 'z': 10 * x_1 + 6 * x_2 + 4 * x_3
//! (p) 1 * x_1 + 1 * x_2 + 1 * x_3 <= 100
//! ```

use std::fmt::{self, Write as _};

use lqp_expr::QuadraticExpr;

use crate::model::Problem;
use crate::types::{Objective, VariableRange};

impl Problem {
    /// Write the text dump to stdout.
    pub fn print(&self) {
        println!("{self}");
    }

    fn render_objective(&self, objective: &Objective) -> String {
        let mut line = String::from(objective.sense.as_str());
        if objective.name.is_empty() {
            line.push_str(": ");
        } else {
            let _ = write!(line, " '{}': ", objective.name);
        }

        let mut body = self.render_terms(&QuadraticExpr::from(&objective.expression));
        let constant = objective.expression.constant();
        if constant != 0.0 {
            if body.is_empty() {
                body = format_number(constant);
            } else {
                push_signed(&mut body, constant, &format_number(constant.abs()));
            }
        }
        if body.is_empty() {
            body.push('0');
        }
        line.push_str(&body);
        line
    }

    fn render_constraint(&self, expression: &QuadraticExpr, range: VariableRange) -> String {
        let mut body = self.render_terms(expression);
        if body.is_empty() {
            body.push('0');
        }

        match range.shifted(expression.constant()) {
            VariableRange::Unbounded => format!("{body} free"),
            VariableRange::LowerBounded(lower) => format!("{body} >= {}", format_number(lower)),
            VariableRange::UpperBounded(upper) => format!("{body} <= {}", format_number(upper)),
            VariableRange::Bounded(lower, upper) => format!(
                "{} <= {body} <= {}",
                format_number(lower),
                format_number(upper)
            ),
            VariableRange::Fixed(value) => format!("{body} == {}", format_number(value)),
        }
    }

    /// Linear terms as `c * name`, then quadratic terms as `c * a * b`.
    fn render_terms(&self, expression: &QuadraticExpr) -> String {
        let mut rendered = String::new();
        for term in expression.linear_terms() {
            let body = format!(
                "{} * {}",
                format_number(term.coefficient.abs()),
                self.variable_name(term.variable)
            );
            push_signed(&mut rendered, term.coefficient, &body);
        }
        for term in expression.quadratic_terms() {
            let body = format!(
                "{} * {} * {}",
                format_number(term.coefficient.abs()),
                self.variable_name(term.variables.first()),
                self.variable_name(term.variables.second())
            );
            push_signed(&mut rendered, term.coefficient, &body);
        }
        rendered
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_objective(&self.objective))?;
        for constraint in &self.constraints {
            writeln!(f)?;
            if !constraint.name.is_empty() {
                write!(f, "({}) ", constraint.name)?;
            }
            write!(
                f,
                "{}",
                self.render_constraint(&constraint.expression, constraint.range)
            )?;
        }
        Ok(())
    }
}

/// Append `body` with a ` + `/` - ` separator (or a leading `-`) taken from `value`'s sign.
fn push_signed(rendered: &mut String, value: f64, body: &str) {
    let negative = value < 0.0;
    if rendered.is_empty() {
        if negative {
            rendered.push('-');
        }
    } else if negative {
        rendered.push_str(" - ");
    } else {
        rendered.push_str(" + ");
    }
    rendered.push_str(body);
}

/// Magnitudes below this render in scientific notation.
const SCIENTIFIC_BELOW: f64 = 1e-6;

/// Shared numeric formatter for text output.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-inf".to_string()
        } else {
            "inf".to_string()
        };
    }

    // Fixed precision would round these to 0.
    if value != 0.0 && value.abs() < SCIENTIFIC_BELOW {
        return format!("{value:e}");
    }

    let mut rendered = format!("{value:.12}");
    while rendered.ends_with('0') {
        rendered.pop();
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }
    if rendered == "-0" {
        "0".to_string()
    } else {
        rendered
    }
}
