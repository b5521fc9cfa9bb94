//! Terminal Shell
//!
//! Line-oriented front end over the auth context and navigator.

use auth::guard::{AUTH_ENTRY, RouteDecision};
use auth::models::auth_operation::AuthOperation;
use auth::presentation::{NAV_ITEMS, UserBadge};
use auth::{
    AuthContext, AuthController, AuthError, IdentityGateway, Navigator, Notice, Subscription,
};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  login <email> <password>
  signup <email> <password> <name...>
  google
  logout
  go <path>
  back
  whoami
  help
  quit";

const RESTART_HINT: &str = "restart the dashboard to continue";

/// Parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Signup { email: String, password: String, name: String },
    Google,
    Logout,
    Go(String),
    Back,
    WhoAmI,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::Empty);
        };

        let command = match head {
            "login" => match (words.next(), words.next()) {
                (Some(email), Some(password)) => Self::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                },
                _ => anyhow::bail!("usage: login <email> <password>"),
            },
            "signup" => match (words.next(), words.next()) {
                (Some(email), Some(password)) => Self::Signup {
                    email: email.to_string(),
                    password: password.to_string(),
                    // Blank names are left to the controller to reject
                    name: words.collect::<Vec<_>>().join(" "),
                },
                _ => anyhow::bail!("usage: signup <email> <password> <name...>"),
            },
            "google" => Self::Google,
            "logout" => Self::Logout,
            "go" => match words.next() {
                Some(path) => Self::Go(path.to_string()),
                None => anyhow::bail!("usage: go <path>"),
            },
            "back" => Self::Back,
            "whoami" => Self::WhoAmI,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => anyhow::bail!("unknown command `{other}`, try `help`"),
        };
        Ok(command)
    }
}

/// Output of one command
#[derive(Debug, Default)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn notice(&mut self, notice: &Notice) {
        let marker = if notice.destructive { "!" } else { "*" };
        self.line(format!("{marker} {}: {}", notice.title, notice.description));
    }
}

/// Interactive shell
pub struct Shell<G>
where
    G: IdentityGateway,
{
    context: AuthContext<G>,
    navigator: Navigator,
    _binding: Subscription,
}

impl<G> Shell<G>
where
    G: IdentityGateway,
{
    pub fn new(controller: AuthController<G>) -> Self {
        let navigator = Navigator::new(controller.session_store(), "/");
        let binding = navigator.bind();
        Self {
            context: AuthContext::new(controller),
            navigator,
            _binding: binding,
        }
    }

    /// Read commands from stdin until `quit` or end of input
    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("{HELP}");
        self.print_route();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let reply = match Command::parse(&line) {
                Ok(command) => self.execute(command).await,
                Err(e) => {
                    let mut reply = Reply::default();
                    reply.line(e.to_string());
                    reply
                }
            };

            for line in &reply.lines {
                println!("{line}");
            }
            if reply.quit {
                break;
            }
        }

        tracing::info!("Shell closed");
        Ok(())
    }

    pub fn print_route(&self) {
        println!("{}", self.route_line());
    }

    fn route_line(&self) -> String {
        let path = self.navigator.current_path();
        match self.navigator.decision() {
            RouteDecision::Render(view) => {
                let nav = if path == AUTH_ENTRY {
                    String::new()
                } else {
                    let items: Vec<String> = NAV_ITEMS
                        .iter()
                        .map(|item| {
                            if item.is_active(&path) {
                                format!("[{}]", item.label)
                            } else {
                                item.label.to_string()
                            }
                        })
                        .collect();
                    format!("  | {}", items.join(" · "))
                };
                format!("{path} -> {view}{nav}")
            }
            decision => format!("{path} -> {decision}"),
        }
    }

    pub async fn execute(&mut self, command: Command) -> Reply {
        let before = self.context.use_session().status;
        let mut reply = Reply::default();

        match command {
            Command::Empty => return reply,
            Command::Help => reply.line(HELP),
            Command::Quit => {
                reply.quit = true;
                return reply;
            }
            Command::Login { email, password } => {
                let outcome = self.context.login(email, password).await;
                report(&mut reply, AuthOperation::Login, outcome.map(|p| p.name));
            }
            Command::Signup { email, password, name } => {
                let outcome = self.context.signup(name, email, password).await;
                report(&mut reply, AuthOperation::Signup, outcome.map(|p| p.name));
            }
            Command::Google => {
                let outcome = self.context.login_with_google().await;
                report(&mut reply, AuthOperation::FederatedLogin, outcome.map(|p| p.name));
            }
            Command::Logout => {
                if let Err(e) = self.context.logout().await {
                    reply.notice(&Notice::from_error(AuthOperation::Logout, &e));
                }
            }
            Command::Go(path) => {
                self.navigator.navigate(path);
            }
            Command::Back => {
                if self.navigator.back().is_none() {
                    reply.line("already at the first page");
                }
            }
            Command::WhoAmI => {
                let badge = UserBadge::from_session(&self.context.use_session());
                reply.line(format!(
                    "({}) {} <{}>",
                    badge.initial,
                    badge.display_name,
                    badge.email.as_deref().unwrap_or("signed out")
                ));
                return reply;
            }
        }

        let after = self.context.use_session().status;
        if after != before {
            reply.line(format!("session: {before} -> {after}"));
        }
        reply.line(self.route_line());
        reply
    }
}

fn report(reply: &mut Reply, operation: AuthOperation, outcome: Result<String, AuthError>) {
    match outcome {
        Ok(name) => reply.notice(&Notice::info("Signed in", format!("Welcome, {name}!"))),
        Err(e) => {
            reply.notice(&Notice::from_error(operation, &e));
            let app_error = e.to_app_error();
            tracing::debug!(operation = %operation, error = %app_error, "Shown to user");
            if let Some(action) = app_error.action() {
                reply.line(format!("  {action}"));
            }
            if !app_error.is_recoverable() {
                reply.line(format!("  {RESTART_HINT}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use auth::{InMemoryIdentityGateway, Profile, SessionStatus, SessionStore};

    fn status(shell: &Shell<InMemoryIdentityGateway>) -> SessionStatus {
        shell.context.use_session().status
    }

    fn shell() -> Shell<InMemoryIdentityGateway> {
        let gateway = InMemoryIdentityGateway::new()
            .with_account("Demo User", "demo@example.com", "Demo123!")
            .with_federated_profile(Profile::new("Google Demo", "g@example.com"));
        Shell::new(AuthController::new(Arc::new(gateway), SessionStore::new()))
    }

    #[test]
    fn test_parse_commands() {
        let test_cases = vec![
            ("", Command::Empty),
            ("   ", Command::Empty),
            (
                "login a@b.com secret1",
                Command::Login {
                    email: "a@b.com".into(),
                    password: "secret1".into(),
                },
            ),
            (
                "signup a@b.com Strong1! Ada  Lovelace",
                Command::Signup {
                    email: "a@b.com".into(),
                    password: "Strong1!".into(),
                    name: "Ada Lovelace".into(),
                },
            ),
            (
                "signup a@b.com Strong1!",
                Command::Signup {
                    email: "a@b.com".into(),
                    password: "Strong1!".into(),
                    name: String::new(),
                },
            ),
            ("google", Command::Google),
            ("go /notes", Command::Go("/notes".into())),
            ("exit", Command::Quit),
        ];

        for (line, expected) in test_cases {
            assert_eq!(Command::parse(line).unwrap(), expected, "line: {line:?}");
        }
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Command::parse("login only-email").is_err());
        assert!(Command::parse("go").is_err());
        assert!(Command::parse("sudo rm").is_err());
    }

    #[tokio::test]
    async fn test_login_and_logout_flow() {
        let mut shell = shell();
        assert_eq!(status(&shell), SessionStatus::Initializing);

        shell
            .context
            .controller()
            .resolve_initial_session()
            .await
            .unwrap();
        assert_eq!(shell.navigator.current_path(), "/auth");

        let reply = shell
            .execute(Command::parse("login demo@example.com Demo123!").unwrap())
            .await;
        assert!(reply.lines.iter().any(|l| l.contains("Welcome, Demo User!")));
        assert!(reply.lines.iter().any(|l| l.starts_with("/dashboard -> Dashboard")));

        let reply = shell.execute(Command::Logout).await;
        assert!(
            reply
                .lines
                .contains(&"session: authenticated -> unauthenticated".to_string())
        );
        assert_eq!(shell.navigator.current_path(), "/auth");
    }

    #[tokio::test]
    async fn test_failed_login_shows_notice() {
        let mut shell = shell();
        shell
            .context
            .controller()
            .resolve_initial_session()
            .await
            .unwrap();

        let reply = shell
            .execute(Command::parse("login demo@example.com short").unwrap())
            .await;
        assert_eq!(
            reply.lines[0],
            "! Invalid Password: Password must be at least 6 characters."
        );
        assert_eq!(status(&shell), SessionStatus::Unauthenticated);
    }

    #[test]
    fn test_report_adds_action_and_restart_hint() {
        let mut reply = Reply::default();
        report(
            &mut reply,
            AuthOperation::Login,
            Err(AuthError::NetworkUnavailable("timed out".into())),
        );
        assert_eq!(
            reply.lines,
            vec![
                "! Network Unavailable: timed out".to_string(),
                "  Check your connection and try again".to_string(),
            ]
        );

        let mut reply = Reply::default();
        report(
            &mut reply,
            AuthOperation::Login,
            Err(AuthError::InvalidStateTransition("broken".into())),
        );
        assert_eq!(reply.lines.last(), Some(&format!("  {RESTART_HINT}")));
    }

    #[tokio::test]
    async fn test_whoami_and_quit() {
        let mut shell = shell();
        let reply = shell.execute(Command::WhoAmI).await;
        assert_eq!(reply.lines, vec!["(U) User <signed out>".to_string()]);

        let reply = shell.execute(Command::Quit).await;
        assert!(reply.quit);
    }
}
