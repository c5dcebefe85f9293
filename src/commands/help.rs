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

use crate::commands::manuals;
use crate::core::context::Context;
use crate::error::Error;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Help {
    list: bool,
    topic: Option<Topic>,
}

impl Subcommand<Context> for Help {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(cliproc::Help::with(HELP))?;
        Ok(Help {
            list: cli.check(Arg::flag("list"))?,
            topic: cli.get(Arg::positional("topic"))?,
        })
    }

    fn execute(self, _: &Context) -> proc::Result {
        if self.list == true {
            println!("{}", Topic::list_all());
            return Ok(());
        }
        self.run()?;
        Ok(())
    }
}

impl Help {
    fn run(&self) -> Result<(), Error> {
        let text = match &self.topic {
            Some(t) => t.as_manual(),
            None => HELP,
        };
        println!("{}", text);
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum Topic {
    Plan,
    Stage,
    Env,
    Config,
    Init,
}

impl Topic {
    fn list_all() -> String {
        let list = ["plan", "stage", "env", "config", "init"];
        list.into_iter().fold(String::new(), |mut acc, x| {
            acc.push_str(&format!("{}\n", x));
            acc
        })
    }

    /// Accesses the long-form manual page for the topic.
    fn as_manual(&self) -> &str {
        match self {
            Self::Plan => manuals::plan::MANUAL,
            Self::Stage => manuals::stage::MANUAL,
            Self::Env => manuals::env::MANUAL,
            Self::Config => manuals::config::MANUAL,
            Self::Init => manuals::init::MANUAL,
        }
    }
}

impl std::str::FromStr for Topic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "plan" => Self::Plan,
            "stage" => Self::Stage,
            "env" => Self::Env,
            "config" => Self::Config,
            "init" => Self::Init,
            _ => return Err(Error::TopicUnknown(s.to_string())),
        })
    }
}

const HELP: &str = "\
Read in-depth documentation around linkplan topics.

Usage:
    linkplan help [options] [<topic>]

Options:
    <topic>      Command or concept to learn more about
    --list       View all available topics

Use 'linkplan help --list' to see all the topics.
";
