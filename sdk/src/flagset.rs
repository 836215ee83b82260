//! A flag registry backed by `clap`.
//!
//! Generated `bind` methods register one [`Value`] per field. [`FlagSet::parse`]
//! builds a `clap::Command` from the registrations, lets clap tokenize the
//! arguments and then feeds each occurrence, in order, to the flag's value.

use std::collections::HashMap;

use clap::builder::ValueParser;
use clap::{Arg, ArgAction, Command};

use crate::error::FlagError;
use crate::value::Value;

const POSITIONAL_ID: &str = "__protoflags_args";

/// One registered flag and the value it writes into.
pub struct Flag<'a> {
    pub name:       String,
    pub short:      Option<char>,
    pub usage:      String,
    pub hidden:     bool,
    pub deprecated: Option<String>,
    /// Set once the flag has been given on the command line or through
    /// [`FlagSet::set`].
    pub changed:    bool,
    value:          Box<dyn Value + 'a>,
}

impl<'a> Flag<'a> {
    pub fn value(&self) -> &(dyn Value + 'a) {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> &mut (dyn Value + 'a) {
        self.value.as_mut()
    }

    fn arg(&self) -> Arg {
        let mut arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .action(ArgAction::Append)
            .allow_hyphen_values(true)
            .value_parser(ValueParser::string())
            .value_name(self.value.kind())
            .help(self.usage.clone())
            .hide(self.hidden || self.deprecated.is_some());

        arg = match self.value.implicit_value() {
            Some(implicit) => arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value(implicit),
            None => arg.num_args(1),
        };

        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        arg
    }
}

/// Why clap cannot register `name` as a long flag, if it cannot.
fn check_name(name: &str, short: Option<char>) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if name.starts_with('-') {
        return Err("name starts with '-'".to_string());
    }
    if name.contains('=') {
        return Err("name contains '='".to_string());
    }
    if name == POSITIONAL_ID {
        return Err("name is reserved".to_string());
    }
    if short == Some('-') {
        return Err("short alias is '-'".to_string());
    }
    Ok(())
}

/// The set of flags a program accepts.
///
/// The lifetime ties the set to the messages its values write into: a message
/// stays mutably borrowed until the set is dropped.
pub struct FlagSet<'a> {
    name:     String,
    flags:    Vec<Flag<'a>>,
    by_name:  HashMap<String, usize>,
    by_short: HashMap<char, usize>,
}

impl<'a> FlagSet<'a> {
    pub fn new(name: &str) -> Self {
        FlagSet {
            name:     name.to_string(),
            flags:    Vec::new(),
            by_name:  HashMap::new(),
            by_short: HashMap::new(),
        }
    }

    /// Registers `value` under `name`.
    pub fn var<V>(&mut self, value: V, name: &str, short: Option<char>, usage: &str) -> Result<(), FlagError>
    where
        V: Value + 'a,
    {
        check_name(name, short).map_err(|reason| FlagError::InvalidName {
            name: name.to_string(),
            reason,
        })?;
        if self.by_name.contains_key(name) {
            return Err(FlagError::Redefined(name.to_string()));
        }
        if let Some(short) = short {
            if let Some(&existing) = self.by_short.get(&short) {
                return Err(FlagError::ShortRedefined {
                    short,
                    name: name.to_string(),
                    existing: self.flags[existing].name.clone(),
                });
            }
        }

        log::debug!("registering flag --{} ({})", name, value.kind());

        let index = self.flags.len();
        self.flags.push(Flag {
            name: name.to_string(),
            short,
            usage: usage.to_string(),
            hidden: false,
            deprecated: None,
            changed: false,
            value: Box::new(value),
        });
        self.by_name.insert(name.to_string(), index);
        if let Some(short) = short {
            self.by_short.insert(short, index);
        }
        Ok(())
    }

    pub fn mark_hidden(&mut self, name: &str) -> Result<(), FlagError> {
        self.lookup_mut(name)?.hidden = true;
        Ok(())
    }

    /// Hides the flag from help and warns with `message` whenever it is used.
    pub fn mark_deprecated(&mut self, name: &str, message: &str) -> Result<(), FlagError> {
        if message.is_empty() {
            return Err(FlagError::MissingDeprecationMessage(name.to_string()));
        }
        self.lookup_mut(name)?.deprecated = Some(message.to_string());
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Flag<'a>> {
        self.by_name.get(name).map(|&index| &self.flags[index])
    }

    pub fn lookup_mut(&mut self, name: &str) -> Result<&mut Flag<'a>, FlagError> {
        match self.by_name.get(name) {
            Some(&index) => Ok(&mut self.flags[index]),
            None => Err(FlagError::NoSuchFlag(name.to_string())),
        }
    }

    pub fn flags(&self) -> impl Iterator<Item = &Flag<'a>> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn changed(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|flag| flag.changed)
    }

    /// Parses `input` into the named flag as if it had been given on the
    /// command line.
    pub fn set(&mut self, name: &str, input: &str) -> Result<(), FlagError> {
        let flag = self.lookup_mut(name)?;
        if let Some(message) = &flag.deprecated {
            log::warn!("flag --{} has been deprecated, {}", flag.name, message);
        }
        flag.value.parse(input).map_err(|source| FlagError::InvalidArgument {
            flag: name.to_string(),
            input: input.to_string(),
            source,
        })?;
        flag.changed = true;
        Ok(())
    }

    /// The `clap::Command` describing every registered flag.
    pub fn command(&self) -> Command {
        let help_taken = self.by_name.contains_key("help") || self.by_short.contains_key(&'h');

        let mut command = Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_help_flag(help_taken)
            .arg(
                Arg::new(POSITIONAL_ID)
                    .num_args(0..)
                    .action(ArgAction::Append)
                    .value_parser(ValueParser::string())
                    .hide(true),
            );
        for flag in &self.flags {
            command = command.arg(flag.arg());
        }
        command
    }

    /// Parses `args` (without the program name) and returns the positional
    /// arguments that are left over.
    pub fn parse<I, T>(&mut self, args: I) -> Result<Vec<String>, FlagError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut matches = self.command().try_get_matches_from(args)?;

        let names: Vec<String> = self.flags.iter().map(|flag| flag.name.clone()).collect();
        for name in names {
            let inputs: Vec<String> = match matches.try_remove_many::<String>(&name) {
                Ok(Some(values)) => values.collect(),
                _ => continue,
            };
            for input in inputs {
                self.set(&name, &input)?;
            }
        }

        let rest = matches
            .try_remove_many::<String>(POSITIONAL_ID)
            .ok()
            .flatten()
            .map(|values| values.collect())
            .unwrap_or_default();
        Ok(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Bool, Int32, Str};
    use crate::value::{Optional, Plain, Repeated};

    #[test]
    fn parses_long_and_short_flags() {
        let mut port = 80;
        let mut host = String::new();
        let rest = {
            let mut fs = FlagSet::new("test");
            fs.var(Plain::new(&mut port, Int32), "port", Some('p'), "Port").unwrap();
            fs.var(Plain::new(&mut host, Str), "host", None, "Host").unwrap();
            let rest = fs.parse(["-p", "8080", "--host=example.com", "serve"]).unwrap();
            assert!(fs.changed("port"));
            rest
        };
        assert_eq!(port, 8080);
        assert_eq!(host, "example.com");
        assert_eq!(rest, vec!["serve"]);
    }

    #[test]
    fn bool_flags_take_an_optional_value() {
        let mut verbose = false;
        let mut color: Option<bool> = Some(true);
        {
            let mut fs = FlagSet::new("test");
            fs.var(Plain::new(&mut verbose, Bool), "verbose", Some('v'), "Verbose").unwrap();
            fs.var(Optional::new(&mut color, Bool), "color", None, "Color").unwrap();
            fs.parse(["--verbose", "--color=false"]).unwrap();
        }
        assert!(verbose);
        assert_eq!(color, Some(false));
    }

    #[test]
    fn repeated_occurrences_are_applied_in_order() {
        let mut tags = vec!["default".to_string()];
        {
            let mut fs = FlagSet::new("test");
            fs.var(Repeated::new(&mut tags, Str), "tag", None, "Tags").unwrap();
            fs.parse(["--tag", "a,b", "--tag", "c"]).unwrap();
        }
        assert_eq!(tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn negative_numbers_are_values() {
        let mut offset = 0;
        {
            let mut fs = FlagSet::new("test");
            fs.var(Plain::new(&mut offset, Int32), "offset", None, "Offset").unwrap();
            fs.parse(["--offset", "-5"]).unwrap();
        }
        assert_eq!(offset, -5);
    }

    #[test]
    fn bad_values_name_the_flag() {
        let mut port = 80;
        let mut fs = FlagSet::new("test");
        fs.var(Plain::new(&mut port, Int32), "port", None, "Port").unwrap();
        let err = fs.parse(["--port", "http"]).unwrap_err();
        assert!(matches!(err, FlagError::InvalidArgument { ref flag, .. } if flag == "port"));
        assert!(err.to_string().contains("--port"));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let mut fs = FlagSet::new("test");
        assert!(matches!(fs.parse(["--nope", "1"]), Err(FlagError::Command(_))));
    }

    #[test]
    fn duplicate_registrations_fail() {
        let (mut a, mut b, mut c) = (0, 0, 0);
        let mut fs = FlagSet::new("test");
        fs.var(Plain::new(&mut a, Int32), "a", Some('x'), "A").unwrap();
        assert!(matches!(
            fs.var(Plain::new(&mut b, Int32), "a", None, "B"),
            Err(FlagError::Redefined(_))
        ));
        let err = fs.var(Plain::new(&mut c, Int32), "c", Some('x'), "C").unwrap_err();
        assert_eq!(err.to_string(), "shorthand -x for --c is already used by --a");
    }

    #[test]
    fn marking_flags() {
        let mut port = 80;
        let mut fs = FlagSet::new("test");
        fs.var(Plain::new(&mut port, Int32), "port", None, "Port").unwrap();
        fs.mark_hidden("port").unwrap();
        assert!(matches!(fs.mark_hidden("missing"), Err(FlagError::NoSuchFlag(_))));
        assert!(matches!(
            fs.mark_deprecated("port", ""),
            Err(FlagError::MissingDeprecationMessage(_))
        ));
        fs.mark_deprecated("port", "use --listen").unwrap();

        let flag = fs.lookup("port").unwrap();
        assert!(flag.hidden);
        assert_eq!(flag.deprecated.as_deref(), Some("use --listen"));
        assert_eq!(flag.value().format(), "80");

        fs.set("port", "81").unwrap();
        assert_eq!(fs.lookup("port").unwrap().value().format(), "81");
    }

    #[test]
    fn help_flag_gives_way_to_user_flags() {
        let mut help = String::new();
        {
            let mut fs = FlagSet::new("test");
            fs.var(Plain::new(&mut help, Str), "help", Some('h'), "Help topic").unwrap();
            fs.parse(["-h", "flags"]).unwrap();
        }
        assert_eq!(help, "flags");
    }

    #[test]
    fn command_describes_flags() {
        let mut port = 80;
        let mut fs = FlagSet::new("server");
        fs.var(Plain::new(&mut port, Int32), "port", Some('p'), "Port to listen on").unwrap();
        let command = fs.command();
        let arg = command.get_arguments().find(|arg| arg.get_id() == "port").unwrap();
        assert_eq!(arg.get_short(), Some('p'));
        assert_eq!(arg.get_long(), Some("port"));
        assert_eq!(arg.get_help().map(ToString::to_string).as_deref(), Some("Port to listen on"));
    }

    #[test]
    fn names_clap_cannot_take_are_rejected() {
        let mut a = 0;
        let mut b = 0;
        let mut c = 0;
        let mut d = 0;
        let mut ok = 0;
        let mut fs = FlagSet::new("test");
        for (value, name, short) in [
            (&mut a, "", None),
            (&mut b, "-a--b", None),
            (&mut c, "key=value", None),
            (&mut d, "dash", Some('-')),
        ] {
            let err = fs.var(Plain::new(value, Int32), name, short, "Bad").unwrap_err();
            assert!(matches!(err, FlagError::InvalidName { name: ref n, .. } if n == name));
        }
        assert!(fs.is_empty());

        fs.var(Plain::new(&mut ok, Int32), "a--b", None, "Fine").unwrap();
        fs.parse(["--a--b=3"]).unwrap();
        drop(fs);
        assert_eq!(ok, 3);
    }
}
