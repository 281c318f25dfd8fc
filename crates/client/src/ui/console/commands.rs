//! Console command parsing.
//!
//! ```text
//! login <user> <password>
//! new-user | new-role
//! add-user username=jdoe firstname="Jane Doe" supervisor_id=2
//! add-role role_name=Auditor
//! show | quit
//! ```

use thiserror::Error;

use crate::application::{FormError, LoginForm, RoleForm, UiIntent, UserForm};

pub const HELP: &str = "commands: login <user> <password> | new-user | new-role | \
add-user key=value... | add-role key=value... | show | quit";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("'{command}' takes at most {max} argument(s)")]
    TooManyArguments { command: &'static str, max: usize },
    #[error("expected key=value, got '{0}'")]
    NotAnAssignment(String),
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Split a line on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Result<Vec<String>, CommandParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if quoted {
        return Err(CommandParseError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn assignments(args: &[String]) -> Result<Vec<(&str, &str)>, CommandParseError> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .ok_or_else(|| CommandParseError::NotAnAssignment(arg.clone()))
        })
        .collect()
}

fn no_args(command: &'static str, args: &[String]) -> Result<(), CommandParseError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandParseError::TooManyArguments { command, max: 0 })
    }
}

pub fn parse_command(line: &str) -> Result<UiIntent, CommandParseError> {
    let tokens = tokenize(line)?;
    let Some((command, args)) = tokens.split_first() else {
        return Err(CommandParseError::Empty);
    };

    match command.as_str() {
        "login" => {
            if args.len() > 2 {
                return Err(CommandParseError::TooManyArguments {
                    command: "login",
                    max: 2,
                });
            }
            // Missing arguments behave like empty text boxes.
            let username = args.first().cloned().unwrap_or_default();
            let password = args.get(1).cloned().unwrap_or_default();
            Ok(UiIntent::SubmitLogin(LoginForm::new(username, password)))
        }
        "new-user" => no_args("new-user", args).map(|()| UiIntent::OpenUserForm),
        "new-role" => no_args("new-role", args).map(|()| UiIntent::OpenRoleForm),
        "add-user" => {
            let mut form = UserForm::default();
            for (key, value) in assignments(args)? {
                form.set(key, value)?;
            }
            Ok(UiIntent::SubmitUser(form))
        }
        "add-role" => {
            let mut form = RoleForm::default();
            for (key, value) in assignments(args)? {
                form.set(key, value)?;
            }
            Ok(UiIntent::SubmitRole(form))
        }
        "show" => no_args("show", args).map(|()| UiIntent::Show),
        "quit" | "exit" => Ok(UiIntent::Quit),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_with_two_arguments() {
        assert_eq!(
            parse_command("login admin secret"),
            Ok(UiIntent::SubmitLogin(LoginForm::new("admin", "secret")))
        );
    }

    #[test]
    fn login_without_password_submits_empty_password() {
        assert_eq!(
            parse_command("  login admin  "),
            Ok(UiIntent::SubmitLogin(LoginForm::new("admin", "")))
        );
    }

    #[test]
    fn quoted_values_keep_spaces() {
        let intent = parse_command(r#"add-user username=jdoe firstname="Jane Mary" lastname="""#)
            .expect("valid command");
        let UiIntent::SubmitUser(form) = intent else {
            panic!("expected SubmitUser, got {intent:?}");
        };
        assert_eq!(form.username, "jdoe");
        assert_eq!(form.firstname, "Jane Mary");
        assert_eq!(form.lastname, "");
    }

    #[test]
    fn add_role_collects_fields() {
        let intent = parse_command("add-role role_name=Auditor role_start_date=2024-01-01")
            .expect("valid command");
        let UiIntent::SubmitRole(form) = intent else {
            panic!("expected SubmitRole, got {intent:?}");
        };
        assert_eq!(form.role_name, "Auditor");
        assert_eq!(form.role_start_date, "2024-01-01");
        assert!(form.role_description.is_empty());
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let intent = parse_command("add-user password=a=b").expect("valid command");
        let UiIntent::SubmitUser(form) = intent else {
            panic!("expected SubmitUser, got {intent:?}");
        };
        assert_eq!(form.password, "a=b");
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_command("   "), Err(CommandParseError::Empty));
        assert_eq!(
            parse_command("dance"),
            Err(CommandParseError::UnknownCommand("dance".to_string()))
        );
        assert_eq!(
            parse_command(r#"login "admin"#),
            Err(CommandParseError::UnterminatedQuote)
        );
        assert_eq!(
            parse_command("add-role role_name"),
            Err(CommandParseError::NotAnAssignment("role_name".to_string()))
        );
        assert!(matches!(
            parse_command("add-role colour=red"),
            Err(CommandParseError::Form(_))
        ));
        assert!(matches!(
            parse_command("show me"),
            Err(CommandParseError::TooManyArguments { command: "show", .. })
        ));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_command("new-user"), Ok(UiIntent::OpenUserForm));
        assert_eq!(parse_command("new-role"), Ok(UiIntent::OpenRoleForm));
        assert_eq!(parse_command("show"), Ok(UiIntent::Show));
        assert_eq!(parse_command("quit"), Ok(UiIntent::Quit));
    }
}
