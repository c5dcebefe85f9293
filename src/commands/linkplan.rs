//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use crate::commands::config::Config;
use crate::commands::env::Env;
use crate::commands::help::Help;
use crate::commands::helps::linkplan;
use crate::commands::init::Init;
use crate::commands::plan::Plan;
use crate::commands::stage::Stage;
use crate::core::config;
use crate::core::context::Context;
use crate::util::environment;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Command, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Linkplan {
    version: bool,
    command: Option<LinkplanSubcommand>,
}

impl Command for Linkplan {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(cliproc::Help::with(linkplan::HELP))?;
        Ok(Linkplan {
            version: cli.check(Arg::flag("version"))?,
            command: cli.nest(Arg::subcommand("command"))?,
        })
    }

    fn execute(self) -> proc::Result {
        // prioritize version information
        if self.version == true {
            println!("linkplan {}", crate::VERSION);
            return Ok(());
        }
        match self.command {
            Some(c) => {
                // set up the program context before passing it to the command
                let context = Context::new()
                    .home(environment::LINKPLAN_HOME)?
                    .settings(config::CONFIG_FILE)?
                    .current_module_dir()?;
                c.execute(&context)
            }
            // if no command is given then print the default help
            None => Ok(println!("{}", linkplan::HELP)),
        }
    }
}

#[derive(Debug, PartialEq)]
enum LinkplanSubcommand {
    Plan(Plan),
    Stage(Stage),
    Env(Env),
    Config(Config),
    Init(Init),
    Help(Help),
}

impl Subcommand<Context> for LinkplanSubcommand {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        match cli
            .select(&["plan", "stage", "env", "config", "init", "help"])?
            .as_ref()
        {
            "plan" => Ok(Self::Plan(Plan::interpret(cli)?)),
            "stage" => Ok(Self::Stage(Stage::interpret(cli)?)),
            "env" => Ok(Self::Env(Env::interpret(cli)?)),
            "config" => Ok(Self::Config(Config::interpret(cli)?)),
            "init" => Ok(Self::Init(Init::interpret(cli)?)),
            "help" => Ok(Self::Help(Help::interpret(cli)?)),
            _ => panic!("an unimplemented command was passed through!"),
        }
    }

    fn execute(self, c: &Context) -> proc::Result {
        match self {
            Self::Plan(cmd) => cmd.execute(c),
            Self::Stage(cmd) => cmd.execute(c),
            Self::Env(cmd) => cmd.execute(c),
            Self::Config(cmd) => cmd.execute(c),
            Self::Init(cmd) => cmd.execute(c),
            Self::Help(cmd) => cmd.execute(c),
        }
    }
}
