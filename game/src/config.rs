//====================================================================

use log::LevelFilter;

use crate::{api::DEFAULT_API_BASE, session::BattleRequest};

//====================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    pub team_a: Vec<String>,
    pub team_b: Vec<String>,
    pub level: u32,
    /// Turn limit passed to autoplay. `None` lets the backend decide.
    pub autoplay_turns: Option<u32>,
    pub log_level: LevelFilter,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let request = BattleRequest::default();

        Self {
            api_base: DEFAULT_API_BASE.into(),
            team_a: request.team_a,
            team_b: request.team_b,
            level: request.level,
            autoplay_turns: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl ClientConfig {
    pub fn battle_request(&self) -> BattleRequest {
        BattleRequest {
            team_a: self.team_a.clone(),
            team_b: self.team_b.clone(),
            level: self.level,
        }
    }
}

//====================================================================

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::{App, Arg, ArgMatches};
    use log::LevelFilter;

    use super::ClientConfig;

    fn app() -> App<'static, 'static> {
        App::new("Turnbase Client")
            .about("Plays a battle hosted by the battle backend")
            .arg(
                Arg::with_name("api_base")
                    .long("api-base")
                    .value_name("URL")
                    .help("Base address of the battle backend")
                    .takes_value(true)
                    .validator(|value| {
                        if value.starts_with("http://") || value.starts_with("https://") {
                            Ok(())
                        } else {
                            Err(String::from("URL must start with http:// or https://"))
                        }
                    }),
            )
            .arg(
                Arg::with_name("team_a")
                    .long("team-a")
                    .value_name("NAMES")
                    .help("Comma separated roster for team A")
                    .takes_value(true)
                    .use_delimiter(true),
            )
            .arg(
                Arg::with_name("team_b")
                    .long("team-b")
                    .value_name("NAMES")
                    .help("Comma separated roster for team B")
                    .takes_value(true)
                    .use_delimiter(true),
            )
            .arg(
                Arg::with_name("level")
                    .long("level")
                    .value_name("LEVEL")
                    .help("Level every character is created at")
                    .takes_value(true)
                    .validator(|value| match value.parse::<u32>() {
                        Ok(_) => Ok(()),
                        Err(_) => Err(String::from("Invalid level")),
                    }),
            )
            .arg(
                Arg::with_name("autoplay_turns")
                    .long("autoplay-turns")
                    .value_name("TURNS")
                    .help("Maximum turns played by one autoplay request")
                    .takes_value(true)
                    .validator(|value| {
                        let error_message = "TURNS must be > 0";
                        let turns = value
                            .parse::<u32>()
                            .map_err(|_| String::from(error_message))?;

                        if turns > 0 {
                            Ok(())
                        } else {
                            Err(String::from(error_message))
                        }
                    }),
            )
            .arg(
                Arg::with_name("verbose")
                    .short("v")
                    .long("verbose")
                    .multiple(true)
                    .help("Raises log verbosity, repeat for trace output"),
            )
    }

    fn parse_or<T: std::str::FromStr>(value: Option<&str>, default: T) -> T {
        value.and_then(|value| value.parse().ok()).unwrap_or(default)
    }

    fn roster(matches: &ArgMatches, name: &str, default: Vec<String>) -> Vec<String> {
        match matches.values_of(name) {
            Some(values) => values
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(String::from)
                .collect(),
            None => default,
        }
    }

    impl ClientConfig {
        /// Parses the process arguments, exiting with usage on bad input.
        pub fn from_args() -> Self {
            Self::from_matches(&app().get_matches())
        }

        pub fn try_from_iter<I, T>(args: I) -> Result<Self, clap::Error>
        where
            I: IntoIterator<Item = T>,
            T: Into<std::ffi::OsString> + Clone,
        {
            Ok(Self::from_matches(&app().get_matches_from_safe(args)?))
        }

        fn from_matches(matches: &ArgMatches) -> Self {
            let defaults = ClientConfig::default();

            let log_level = match matches.occurrences_of("verbose") {
                0 => defaults.log_level,
                1 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            };

            Self {
                api_base: matches
                    .value_of("api_base")
                    .map(String::from)
                    .unwrap_or(defaults.api_base),
                team_a: roster(matches, "team_a", defaults.team_a),
                team_b: roster(matches, "team_b", defaults.team_b),
                // validators make these parses infallible
                level: parse_or(matches.value_of("level"), defaults.level),
                autoplay_turns: matches
                    .value_of("autoplay_turns")
                    .and_then(|value| value.parse().ok()),
                log_level,
            }
        }
    }
}

//====================================================================


//====================================================================
