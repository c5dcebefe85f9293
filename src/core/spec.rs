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

use crate::core::build::BuildContext;
use crate::core::build::LinkMode;
use crate::core::profile::Profile;
use glob::{Pattern, PatternError};
use serde::de;
use serde::Serializer;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How one declared dependency participates in the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Static,
    Dynamic,
    Header,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Dynamic => write!(f, "dynamic"),
            Self::Header => write!(f, "header"),
        }
    }
}

/// Which directory anchors a spec's relative path templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Root {
    Sdk,
    Libraries,
    Binaries,
}

/// A glob-style pattern matched case-insensitively against platform names.
#[derive(Debug, Clone)]
pub struct Matcher(Pattern);

impl Matcher {
    pub fn accepts(&self, text: &str) -> bool {
        let opts = glob::MatchOptions {
            case_sensitive: false,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        self.0.matches_with(text, opts)
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

impl FromStr for Matcher {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Pattern::new(s)?))
    }
}

impl<'de> de::Deserialize<'de> for Matcher {
    fn deserialize<D>(deserializer: D) -> Result<Matcher, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct MatcherVisitor;

        impl<'de> de::Visitor<'de> for MatcherVisitor {
            type Value = Matcher;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a glob-style pattern")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match Matcher::from_str(v) {
                    Ok(v) => Ok(v),
                    Err(e) => Err(de::Error::custom(e)),
                }
            }
        }

        deserializer.deserialize_str(MatcherVisitor)
    }
}

impl serde::Serialize for Matcher {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

/// A declarative predicate over the build context.
///
/// Every clause that is present must accept the context for the owning spec
/// to survive; an absent clause accepts everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    platform: Option<Matcher>,
    profile: Option<Vec<Profile>>,
    link: Option<LinkMode>,
}

impl Condition {
    pub fn new() -> Self {
        Self {
            platform: None,
            profile: None,
            link: None,
        }
    }

    /// Restricts to platforms whose display name matches the glob `pattern`.
    pub fn platform(mut self, pattern: &str) -> Result<Self, PatternError> {
        self.platform = Some(Matcher::from_str(pattern)?);
        Ok(self)
    }

    /// Restricts to the listed configuration tiers.
    pub fn profiles(mut self, tiers: Vec<Profile>) -> Self {
        self.profile = Some(tiers);
        self
    }

    /// Restricts to a single link mode.
    pub fn link(mut self, mode: LinkMode) -> Self {
        self.link = Some(mode);
        self
    }

    pub fn accepts(&self, ctx: &BuildContext) -> bool {
        if let Some(pat) = &self.platform {
            if pat.accepts(&ctx.get_platform().to_string()) == false {
                return false;
            }
        }
        if let Some(tiers) = &self.profile {
            if tiers.contains(ctx.get_profile()) == false {
                return false;
            }
        }
        if let Some(mode) = &self.link {
            if mode != ctx.get_link_mode() {
                return false;
            }
        }
        true
    }
}

/// One declared native dependency of a module.
///
/// Path templates may reference substitution variables such as
/// `{{ platform }}`, `{{ config }}`, and `{{ env.* }}` entries; they resolve
/// against the directory selected by `root` (absolute templates pass through
/// unchanged).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencySpec {
    name: String,
    kind: DependencyKind,
    #[serde(default)]
    include: Vec<String>,
    path: Option<String>,
    root: Option<Root>,
    lib: Option<String>,
    bin: Option<String>,
    #[serde(default)]
    runtime: Vec<String>,
    when: Option<Condition>,
}

impl DependencySpec {
    pub fn new(name: &str, kind: DependencyKind) -> Self {
        Self {
            name: name.to_string(),
            kind: kind,
            include: Vec::new(),
            path: None,
            root: None,
            lib: None,
            bin: None,
            runtime: Vec::new(),
            when: None,
        }
    }

    /// Adds an include-directory template.
    pub fn include(mut self, dir: &str) -> Self {
        self.include.push(dir.to_string());
        self
    }

    /// Sets the library-directory template.
    pub fn path(mut self, dir: &str) -> Self {
        self.path = Some(dir.to_string());
        self
    }

    /// Selects the directory that anchors the spec's templates.
    pub fn root(mut self, root: Root) -> Self {
        self.root = Some(root);
        self
    }

    /// Overrides the derived static-library file name.
    pub fn lib(mut self, file: &str) -> Self {
        self.lib = Some(file.to_string());
        self
    }

    /// Overrides the derived dynamic-library file name.
    pub fn bin(mut self, file: &str) -> Self {
        self.bin = Some(file.to_string());
        self
    }

    /// Adds an extra runtime file template, relative to the library directory.
    pub fn runtime(mut self, file: &str) -> Self {
        self.runtime.push(file.to_string());
        self
    }

    /// Guards the spec behind a condition.
    pub fn when(mut self, cond: Condition) -> Self {
        self.when = Some(cond);
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_kind(&self) -> &DependencyKind {
        &self.kind
    }

    pub fn get_include(&self) -> &Vec<String> {
        &self.include
    }

    pub fn get_path(&self) -> Option<&String> {
        self.path.as_ref()
    }

    pub fn get_root(&self) -> Root {
        self.root.unwrap_or(Root::Libraries)
    }

    pub fn get_lib(&self) -> Option<&String> {
        self.lib.as_ref()
    }

    pub fn get_bin(&self) -> Option<&String> {
        self.bin.as_ref()
    }

    pub fn get_runtime(&self) -> &Vec<String> {
        &self.runtime
    }

    /// Evaluates the spec's condition against the context.
    ///
    /// A spec without a condition always survives.
    pub fn accepts(&self, ctx: &BuildContext) -> bool {
        match &self.when {
            Some(cond) => cond.accepts(ctx),
            None => true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::platform::Platform;
    use std::path::Path;

    const D_1: &str = r#"
name = "libavstream"
kind = "dynamic"
include = ["libavstream/Include"]
path = "lib/{{ config }}"
runtime = ["efp.dll"]
when.link = "dynamic"
"#;

    const D_2: &str = r#"
name = "draco"
kind = "static"
root = "sdk"
path = "thirdparty/draco/{{ config }}"
when.platform = "win*"
"#;

    #[test]
    fn from_toml_string() {
        let spec: DependencySpec = toml::from_str(D_1).unwrap();
        assert_eq!(
            spec,
            DependencySpec::new("libavstream", DependencyKind::Dynamic)
                .include("libavstream/Include")
                .path("lib/{{ config }}")
                .runtime("efp.dll")
                .when(Condition::new().link(LinkMode::Dynamic))
        );

        let spec: DependencySpec = toml::from_str(D_2).unwrap();
        assert_eq!(
            spec,
            DependencySpec::new("draco", DependencyKind::Static)
                .root(Root::Sdk)
                .path("thirdparty/draco/{{ config }}")
                .when(Condition::new().platform("win*").unwrap())
        );
    }

    #[test]
    fn condition_platform_pattern() {
        let ctx = BuildContext::new(Path::new("Source/Mod")).platform(Platform::Win64);
        let cond = Condition::new().platform("win*").unwrap();
        // case-insensitive match against the display name
        assert_eq!(cond.accepts(&ctx), true);

        let ctx = ctx.platform(Platform::Linux);
        assert_eq!(cond.accepts(&ctx), false);
    }

    #[test]
    fn condition_link_mode() {
        let ctx = BuildContext::new(Path::new("Source/Mod")).link_mode(LinkMode::Dynamic);
        assert_eq!(
            Condition::new().link(LinkMode::Dynamic).accepts(&ctx),
            true
        );
        assert_eq!(
            Condition::new().link(LinkMode::Static).accepts(&ctx),
            false
        );
    }

    #[test]
    fn condition_profiles() {
        let ctx = BuildContext::new(Path::new("Source/Mod")).profile(Profile::Shipping);
        let cond = Condition::new().profiles(vec![Profile::Debug, Profile::Development]);
        assert_eq!(cond.accepts(&ctx), false);
        let cond = Condition::new().profiles(vec![Profile::Shipping]);
        assert_eq!(cond.accepts(&ctx), true);
    }

    #[test]
    fn unconditional_spec_survives() {
        let ctx = BuildContext::new(Path::new("Source/Mod"));
        let spec = DependencySpec::new("core", DependencyKind::Static);
        assert_eq!(spec.accepts(&ctx), true);
    }
}
