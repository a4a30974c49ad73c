use std::{fmt, str::FromStr};

use crate::{Result, SfError};

/// Salesforce deployment tier a token can be requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    DevRc,
    DevTechRc,
    Prodlike,
    Production,
}

// Lowercased user input to environment. "prod" and "production" are aliases.
const ENV_MAPPING: [(&str, Environment); 5] = [
    ("devrc", Environment::DevRc),
    ("devtechrc", Environment::DevTechRc),
    ("prodlike", Environment::Prodlike),
    ("prod", Environment::Production),
    ("production", Environment::Production),
];

impl Environment {
    pub const ALL: [Environment; 4] = [
        Environment::DevRc,
        Environment::DevTechRc,
        Environment::Prodlike,
        Environment::Production,
    ];

    /// Human readable name, as offered in the selection prompt.
    pub fn label(self) -> &'static str {
        match self {
            Environment::DevRc => "DevRC",
            Environment::DevTechRc => "DevTechRC",
            Environment::Prodlike => "Prodlike",
            Environment::Production => "Production",
        }
    }

    /// Prefix of the configuration keys for this environment.
    pub fn prefix(self) -> &'static str {
        match self {
            Environment::DevRc => "DEVRC",
            Environment::DevTechRc => "DEVTECHRC",
            Environment::Prodlike => "PRODLIKE",
            Environment::Production => "PROD",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Environment::ALL.iter().map(|env| env.label()).collect()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for Environment {
    type Err = SfError;

    fn from_str(s: &str) -> Result<Environment> {
        let name = s.to_lowercase();
        ENV_MAPPING
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, env)| *env)
            .ok_or_else(|| SfError::InvalidEnvironment(s.into()))
    }
}

/// Interactive single choice selection of an environment label.
pub trait EnvironmentPrompt {
    /// Returns the chosen option, or `SfError::SelectionAborted` if the
    /// user cancelled or the prompt could not be shown.
    fn select(&self, options: &[&str]) -> Result<String>;
}

/// Resolves the environment from the command line value, falling back to
/// the prompt when no value (or an empty one) was given.
pub fn resolve_environment<P>(requested: Option<&str>, prompt: &P) -> Result<Environment>
where
    P: EnvironmentPrompt + ?Sized,
{
    let name = match requested {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            log::debug!("No environment given, prompting");
            prompt.select(&Environment::labels())?
        }
    };
    let env = name.parse::<Environment>()?;
    log::debug!("Resolved environment '{}' to {}", name, env);
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    struct FakePrompt {
        answer: Result<String>,
        offered: RefCell<Vec<String>>,
    }

    impl FakePrompt {
        fn new(answer: Result<String>) -> Self {
            Self {
                answer,
                offered: RefCell::new(vec![]),
            }
        }
    }

    impl EnvironmentPrompt for FakePrompt {
        fn select(&self, options: &[&str]) -> Result<String> {
            *self.offered.borrow_mut() = options.iter().map(|o| o.to_string()).collect();
            self.answer.clone()
        }
    }

    #[test]
    fn parse_labels_and_aliases() {
        for (name, prefix) in [
            ("DevRC", "DEVRC"),
            ("devrc", "DEVRC"),
            ("DEVRC", "DEVRC"),
            ("DevTechRC", "DEVTECHRC"),
            ("devTECHrc", "DEVTECHRC"),
            ("Prodlike", "PRODLIKE"),
            ("PRODLIKE", "PRODLIKE"),
            ("Production", "PROD"),
            ("production", "PROD"),
            ("PROD", "PROD"),
            ("prod", "PROD"),
        ] {
            assert_eq!(name.parse::<Environment>().unwrap().prefix(), prefix, "{}", name);
        }
    }

    #[test]
    fn parse_unknown_environment() {
        for name in ["staging", "dev", "prod ", "devrc2", ""] {
            assert_eq!(
                name.parse::<Environment>(),
                Err(SfError::InvalidEnvironment(name.into()))
            );
        }
    }

    #[test]
    fn every_label_parses_to_itself() {
        for env in Environment::ALL {
            assert_eq!(env.label().parse::<Environment>(), Ok(env));
        }
    }

    #[test]
    fn resolve_from_argument_skips_prompt() {
        let prompt = FakePrompt::new(Err(SfError::SelectionAborted("unused".into())));
        assert_eq!(
            resolve_environment(Some("prodlike"), &prompt),
            Ok(Environment::Prodlike)
        );
        assert!(prompt.offered.borrow().is_empty());

        assert_eq!(
            resolve_environment(Some("nope"), &prompt),
            Err(SfError::InvalidEnvironment("nope".into()))
        );
    }

    #[test]
    fn resolve_from_prompt() {
        let prompt = FakePrompt::new(Ok("DevTechRC".into()));
        assert_eq!(resolve_environment(None, &prompt), Ok(Environment::DevTechRc));
        assert_eq!(
            *prompt.offered.borrow(),
            vec!["DevRC", "DevTechRC", "Prodlike", "Production"]
        );

        // an empty argument also prompts
        let prompt = FakePrompt::new(Ok("Production".into()));
        assert_eq!(resolve_environment(Some(""), &prompt), Ok(Environment::Production));
    }

    #[test]
    fn resolve_prompt_aborted() {
        let prompt = FakePrompt::new(Err(SfError::SelectionAborted("interrupted".into())));
        assert_eq!(
            resolve_environment(None, &prompt),
            Err(SfError::SelectionAborted("interrupted".into()))
        );
    }
}
