//! Command line interface

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{App, Arg, ArgMatches};

use atomix::error::{NoneError, WrappedErr};


/// Host settings
///
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Level pack to play
    pub levels: PathBuf,
    /// Number of the level to start with
    pub level: u32,
    /// File keeping the current game
    pub save: Option<PathBuf>,
    /// Address to accept connections on, instead of playing on the terminal
    pub listen: Option<SocketAddr>,
}

impl Settings {
    /// Extract settings from parsed arguments
    ///
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, WrappedErr> {
        let levels = matches
            .value_of_os("levels")
            .map(PathBuf::from)
            .ok_or_else(|| WrappedErr::new("No level pack given", NoneError))?;
        let level: u32 = matches
            .value_of("level")
            .unwrap_or("1")
            .parse()
            .map_err(|e| WrappedErr::new("Invalid level number", e))?;
        let listen = matches
            .value_of("listen")
            .map(str::parse::<SocketAddr>)
            .transpose()
            .map_err(|e| WrappedErr::new("Invalid listen address", e))?;

        Ok(Self {levels, level, save: matches.value_of_os("save").map(PathBuf::from), listen})
    }
}


/// Create the argument parser
///
pub fn app() -> App<'static, 'static> {
    App::new("atomix")
        .version(clap::crate_version!())
        .about("Sliding atom puzzle")
        .arg(Arg::with_name("levels")
            .long("levels")
            .short("p")
            .value_name("FILE")
            .takes_value(true)
            .required(true)
            .help("Level pack to play"))
        .arg(Arg::with_name("level")
            .long("level")
            .short("n")
            .value_name("NUM")
            .takes_value(true)
            .default_value("1")
            .help("Level to start with"))
        .arg(Arg::with_name("save")
            .long("save")
            .short("s")
            .value_name("FILE")
            .takes_value(true)
            .conflicts_with("listen")
            .help("Keep the current game in this file"))
        .arg(Arg::with_name("listen")
            .long("listen")
            .value_name("ADDR")
            .takes_value(true)
            .help("Serve games via TCP on the given address"))
}
