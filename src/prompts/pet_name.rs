use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::template::PromptTemplate;

/// Template text for the pet name prompt.
pub const PET_NAME_TEMPLATE: &str = "I have a {animal_type} and I want a name for it. Its {pet_color} in color. Suggest me five cool names for my pet.";

/// The two caller-supplied fields. Not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub animal_type: String,
    #[serde(default)]
    pub pet_color: String,
}

impl PromptRequest {
    pub fn new(animal_type: impl Into<String>, pet_color: impl Into<String>) -> Self {
        Self {
            animal_type: animal_type.into(),
            pet_color: pet_color.into(),
        }
    }

    pub fn to_prompt(&self) -> String {
        pet_name_template()
            .format(&self.as_values())
            .unwrap_or_else(|err| unreachable!("both pet name fields are supplied: {err}"))
    }

    pub(crate) fn as_values(&self) -> HashMap<&str, &str> {
        HashMap::from([
            ("animal_type", self.animal_type.as_str()),
            ("pet_color", self.pet_color.as_str()),
        ])
    }
}

/// The pet name template as a [`PromptTemplate`].
pub fn pet_name_template() -> PromptTemplate {
    PromptTemplate::new(["animal_type", "pet_color"], PET_NAME_TEMPLATE)
        .unwrap_or_else(|err| unreachable!("built-in pet name template is valid: {err}"))
}

/// Fill the pet name template. Pure; empty strings are substituted as-is.
pub fn pet_name_prompt(animal_type: &str, pet_color: &str) -> String {
    PromptRequest::new(animal_type, pet_color).to_prompt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_brown() {
        assert_eq!(
            pet_name_prompt("cat", "Brown"),
            "I have a cat and I want a name for it. Its Brown in color. Suggest me five cool names for my pet."
        );
    }

    #[test]
    fn test_matches_template_substitution() {
        let inputs = [
            ("cat", "Brown"),
            ("", ""),
            ("{dog}", "100% \"black\""),
            ("{pet_color}", "{animal_type}"),
            ("tortue géante", "vert\nfoncé"),
        ];
        for (animal, color) in inputs {
            let (head, rest) = PET_NAME_TEMPLATE.split_once("{animal_type}").unwrap();
            let (middle, tail) = rest.split_once("{pet_color}").unwrap();
            let expected = format!("{head}{animal}{middle}{color}{tail}");
            assert_eq!(pet_name_prompt(animal, color), expected);
            assert_eq!(PromptRequest::new(animal, color).to_prompt(), expected);
        }
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(pet_name_prompt("dog", "Black"), pet_name_prompt("dog", "Black"));
    }

    #[test]
    fn test_empty_inputs_still_form_prompt() {
        assert_eq!(
            pet_name_prompt("", ""),
            "I have a  and I want a name for it. Its  in color. Suggest me five cool names for my pet."
        );
    }
}
