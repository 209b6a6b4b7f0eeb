pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("healthflow")
        .about("HealthFlow session and identity core")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("session-file")
                .short('s')
                .long("session-file")
                .help("Path of the persisted session record")
                .env("HEALTHFLOW_SESSION_FILE")
                .default_value("healthflow-session.json")
                .global(true),
        );

    logging::with_args(command)
        .subcommand(
            Command::new("login")
                .about("Sign in with an email and password")
                .arg(
                    Arg::new("email")
                        .long("email")
                        .help("Account email")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Account password")
                        .env("HEALTHFLOW_PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("demo")
                .about("Sign in as one of the fixed demo identities")
                .arg(
                    Arg::new("role")
                        .help("Demo role key")
                        .value_parser(["standard", "nutritionist", "admin"])
                        .required(true),
                ),
        )
        .subcommand(Command::new("status").about("Show the session and the navigation it can see"))
        .subcommand(
            Command::new("visit")
                .about("Evaluate the route guard for a page path")
                .arg(
                    Arg::new("path")
                        .help("Page path, e.g. /admin")
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("Clear the session"))
        .subcommand(
            Command::new("signup")
                .about("Run the staged signup flow end to end")
                .arg(
                    Arg::new("email")
                        .long("email")
                        .help("Email to register")
                        .required(true),
                )
                .arg(
                    Arg::new("code")
                        .long("code")
                        .help("One-time code; defaults to the code the flow just sent"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("Display name")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Desired password")
                        .required(true),
                )
                .arg(
                    Arg::new("confirm")
                        .long("confirm")
                        .help("Password confirmation")
                        .required(true),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::new;

    #[test]
    fn command_parses_demo_login() {
        let matches = new().get_matches_from(["healthflow", "demo", "admin"]);
        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "demo");
        assert_eq!(sub.get_one::<String>("role").map(String::as_str), Some("admin"));
    }

    #[test]
    fn session_file_has_a_default_and_is_global() {
        let matches = new().get_matches_from(["healthflow", "status"]);
        assert_eq!(
            matches.get_one::<String>("session-file").map(String::as_str),
            Some("healthflow-session.json")
        );
    }

    #[test]
    fn signup_requires_profile_arguments() {
        let result = new().try_get_matches_from([
            "healthflow",
            "signup",
            "--email",
            "new@example.com",
        ]);
        assert!(result.is_err());
    }
}
