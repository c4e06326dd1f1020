use std::collections::HashMap;

use crate::error::{PetNameError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// Prompt text with `{name}` placeholders for a fixed set of input variables.
///
/// `{{` and `}}` produce literal braces. Substituted values are inserted
/// verbatim and never re-parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    input_variables: Vec<String>,
    template: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse `template` and check it against the declared variables.
    ///
    /// Fails when a placeholder is not declared, a declared variable never
    /// appears, or a brace is left unbalanced.
    pub fn new<I, S>(input_variables: I, template: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let input_variables: Vec<String> = input_variables.into_iter().map(Into::into).collect();
        let template = template.into();
        let segments = parse_segments(&template)?;

        for segment in &segments {
            if let Segment::Variable(name) = segment {
                if !input_variables.contains(name) {
                    return Err(PetNameError::Template(format!(
                        "placeholder `{{{}}}` is not a declared input variable",
                        name
                    )));
                }
            }
        }

        for variable in &input_variables {
            let used = segments
                .iter()
                .any(|segment| matches!(segment, Segment::Variable(name) if name == variable));
            if !used {
                return Err(PetNameError::Template(format!(
                    "input variable `{}` does not appear in the template",
                    variable
                )));
            }
        }

        Ok(Self {
            input_variables,
            template,
            segments,
        })
    }

    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute every declared variable from `values`.
    ///
    /// Extra keys are ignored; a missing declared variable is an error.
    pub fn format(&self, values: &HashMap<&str, &str>) -> Result<String> {
        let mut output = String::with_capacity(self.template.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Variable(name) => {
                    let value = values.get(name.as_str()).ok_or_else(|| {
                        PetNameError::Template(format!("missing value for `{}`", name))
                    })?;
                    output.push_str(value);
                }
            }
        }

        Ok(output)
    }
}

fn parse_segments(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }

                if !closed {
                    return Err(PetNameError::Template(
                        "unclosed `{` in template".to_string(),
                    ));
                }

                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(PetNameError::Template(
                        "empty placeholder `{}` in template".to_string(),
                    ));
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable(name));
            }
            '}' => {
                return Err(PetNameError::Template(
                    "unmatched `}` in template".to_string(),
                ));
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_substitutes_declared_variables() {
        let template = PromptTemplate::new(["who"], "Hello {who}!").unwrap();
        let values = HashMap::from([("who", "world")]);
        assert_eq!(template.format(&values).unwrap(), "Hello world!");
    }

    #[test]
    fn test_escaped_braces_are_literal() {
        let template = PromptTemplate::new(["x"], "{{literal}} {x}").unwrap();
        let values = HashMap::from([("x", "1")]);
        assert_eq!(template.format(&values).unwrap(), "{literal} 1");
    }

    #[test]
    fn test_values_are_not_reparsed() {
        let template = PromptTemplate::new(["x"], "<{x}>").unwrap();
        let values = HashMap::from([("x", "{x}")]);
        assert_eq!(template.format(&values).unwrap(), "<{x}>");
    }

    #[test]
    fn test_undeclared_placeholder_rejected() {
        let err = PromptTemplate::new(["a"], "{a} {b}").unwrap_err();
        assert_eq!(err.error_code(), "TEMPLATE_ERROR");
    }

    #[test]
    fn test_unused_variable_rejected() {
        assert!(PromptTemplate::new(["a", "b"], "{a}").is_err());
    }

    #[test]
    fn test_unbalanced_braces_rejected() {
        assert!(PromptTemplate::new(["a"], "{a").is_err());
        assert!(PromptTemplate::new(["a"], "{a} }").is_err());
    }

    #[test]
    fn test_missing_value_is_error() {
        let template = PromptTemplate::new(["a"], "{a}").unwrap();
        assert!(template.format(&HashMap::new()).is_err());
    }
}
