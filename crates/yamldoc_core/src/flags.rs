use crate::config::Overrides;
use crate::scalar::{coerce_scalar, parse_flag_bool, ConverterOptions};

pub const FLAG_PREFIX: &str = "--yamldoc-";
pub const NEGATED_FLAG_PREFIX: &str = "--no-yamldoc-";

/// Result of scanning an argument vector for `--yamldoc-*` flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFlags {
    pub overrides: Overrides,
    /// Problems found while parsing; each entry is one warning line.
    pub diagnostics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagKey {
    Include,
    Exclude,
    OutDir,
    Toc,
    Index,
    FrontMatter,
    Strict,
    AllowErb,
    ConverterOptions,
}

impl FlagKey {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "include" => FlagKey::Include,
            "exclude" => FlagKey::Exclude,
            "out_dir" => FlagKey::OutDir,
            "toc" => FlagKey::Toc,
            "index" => FlagKey::Index,
            "front_matter" => FlagKey::FrontMatter,
            "strict" => FlagKey::Strict,
            "allow_erb" => FlagKey::AllowErb,
            "converter_options" => FlagKey::ConverterOptions,
            _ => return None,
        })
    }

    fn is_bool(self) -> bool {
        matches!(
            self,
            FlagKey::Index | FlagKey::FrontMatter | FlagKey::Strict | FlagKey::AllowErb
        )
    }
}

/// Parses `--yamldoc-<key> value`, `--yamldoc-<key>=value` and
/// `--no-yamldoc-<key>` flags. Tokens without the prefix are skipped.
pub fn parse_flags<S: AsRef<str>>(argv: &[S]) -> ParsedFlags {
    let mut parsed = ParsedFlags::default();
    let mut i = 0;
    while i < argv.len() {
        let token = argv[i].as_ref();

        if let Some(name) = token.strip_prefix(NEGATED_FLAG_PREFIX) {
            match FlagKey::parse(name) {
                Some(key) if key.is_bool() => parsed.set_bool(key, false),
                _ => parsed.warn(format!("unknown flag {token}")),
            }
            i += 1;
            continue;
        }

        let Some(rest) = token.strip_prefix(FLAG_PREFIX) else {
            i += 1;
            continue;
        };

        if let Some((name, raw)) = rest.split_once('=') {
            match FlagKey::parse(name) {
                Some(key) => parsed.apply_value(key, raw),
                None => parsed.warn(format!("unknown flag {FLAG_PREFIX}{name}")),
            }
            i += 1;
            continue;
        }

        let Some(key) = FlagKey::parse(rest) else {
            parsed.warn(format!("unknown flag {token}"));
            i += 1;
            continue;
        };

        if key.is_bool() {
            // Bare presence means true.
            parsed.set_bool(key, true);
            i += 1;
            continue;
        }

        match argv.get(i + 1).map(AsRef::as_ref) {
            Some(value) if !value.starts_with("--") => {
                parsed.apply_value(key, value);
                i += 2;
            }
            _ => {
                parsed.warn(format!("missing value for {token}"));
                i += 1;
            }
        }
    }
    parsed
}

impl ParsedFlags {
    fn warn(&mut self, message: String) {
        self.diagnostics.push(message);
    }

    fn set_bool(&mut self, key: FlagKey, value: bool) {
        let slot = match key {
            FlagKey::Index => &mut self.overrides.index,
            FlagKey::FrontMatter => &mut self.overrides.front_matter,
            FlagKey::Strict => &mut self.overrides.strict,
            FlagKey::AllowErb => &mut self.overrides.allow_erb,
            _ => return,
        };
        *slot = Some(value);
    }

    fn apply_value(&mut self, key: FlagKey, raw: &str) {
        match key {
            FlagKey::Include => self
                .overrides
                .include
                .get_or_insert_with(Vec::new)
                .push(raw.to_string()),
            FlagKey::Exclude => self
                .overrides
                .exclude
                .get_or_insert_with(Vec::new)
                .push(raw.to_string()),
            FlagKey::OutDir => self.overrides.out_dir = Some(raw.to_string()),
            FlagKey::Toc => self.overrides.toc = Some(raw.to_string()),
            FlagKey::ConverterOptions => {
                let options = self.parse_converter_options(raw);
                self.overrides.converter_options = Some(options);
            }
            FlagKey::Index | FlagKey::FrontMatter | FlagKey::Strict | FlagKey::AllowErb => {
                let value = match parse_flag_bool(raw) {
                    Some(value) => value,
                    None => {
                        self.warn(format!("invalid boolean '{raw}'"));
                        false
                    }
                };
                self.set_bool(key, value);
            }
        }
    }

    fn parse_converter_options(&mut self, raw: &str) -> ConverterOptions {
        let mut options = ConverterOptions::new();
        for pair in raw.split(',') {
            match pair.split_once(':') {
                Some((key, value)) => {
                    options.insert(key.to_string(), coerce_scalar(value));
                }
                None => self.warn(format!("invalid converter option '{pair}'")),
            }
        }
        options
    }
}
