use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_trace, engine_warn};
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Finds files matching `include` and none of `exclude`, with relative
/// patterns resolved against the current working directory.
///
/// See [`find_files_in`].
pub fn find_files<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Vec<PathBuf> {
    match std::env::current_dir() {
        Ok(cwd) => find_files_in(&cwd, include, exclude),
        Err(err) => {
            engine_warn!("cannot resolve working directory for discovery: {}", err);
            Vec::new()
        }
    }
}

/// Resolves include patterns under `root`, drops anything an exclude
/// pattern matches, and returns sorted, deduplicated absolute paths.
///
/// Matching is case-insensitive, supports `{a,b}` alternation, and `*`
/// stays within one path component while `**` crosses directories. Only
/// regular files are returned. Blank or invalid patterns are skipped and a
/// missing directory simply yields no matches.
pub fn find_files_in<S: AsRef<str>>(root: &Path, include: &[S], exclude: &[S]) -> Vec<PathBuf> {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

    // Keyed by the path as matched, so ordering follows the matched form.
    let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();
    for pattern in include.iter().map(AsRef::as_ref) {
        if pattern.trim().is_empty() {
            continue;
        }
        let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
        for alternative in expand_braces(pattern) {
            let Some(glob) = compile(&alternative) else {
                continue;
            };
            let matcher = glob.compile_matcher();
            for (matched, path) in resolve_include(&root, &alternative, &matcher) {
                found.entry(matched).or_insert(path);
            }
        }
    }

    let excludes = exclude_set(exclude);

    found
        .into_iter()
        .filter(|(matched, _)| {
            let excluded = excludes.is_match(matched);
            if excluded {
                engine_debug!("discovery: excluded {}", matched);
            }
            !excluded
        })
        .map(|(_, path)| path)
        .collect()
}

fn exclude_set<S: AsRef<str>>(exclude: &[S]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in exclude.iter().map(AsRef::as_ref) {
        if pattern.trim().is_empty() {
            continue;
        }
        let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
        for glob in expand_braces(pattern).iter().filter_map(|alt| compile(alt)) {
            builder.add(glob);
        }
    }
    builder.build().unwrap_or_else(|err| {
        engine_warn!("discovery: ignoring exclude patterns: {}", err);
        GlobSet::empty()
    })
}

/// Expands `{a,b}` alternation into separate patterns, keeping empty
/// alternatives: `*.y{a,}ml` becomes `*.yaml` and `*.yml`. A brace without
/// its partner is left for the glob compiler to report.
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some((open, close)) = brace_group(pattern) else {
        return vec![pattern.to_string()];
    };
    let head = &pattern[..open];
    let tail = &pattern[close + 1..];
    split_alternatives(&pattern[open + 1..close])
        .into_iter()
        .flat_map(|alt| expand_braces(&format!("{head}{alt}{tail}")))
        .collect()
}

/// Byte offsets of the first outermost unescaped `{...}` group.
fn brace_group(pattern: &str) -> Option<(usize, usize)> {
    let mut open = None;
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in pattern.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => {
                if depth == 0 {
                    open = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return open.map(|start| (start, i));
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits a brace body on its top-level commas.
fn split_alternatives(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

fn compile(pattern: &str) -> Option<Glob> {
    match GlobBuilder::new(pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
    {
        Ok(glob) => Some(glob),
        Err(err) => {
            engine_warn!("discovery: ignoring invalid pattern {:?}: {}", pattern, err);
            None
        }
    }
}

/// Walks from the literal directory prefix of `pattern`, bounded in depth
/// unless the pattern contains `**`.
///
/// For relative patterns a component only joins the prefix when it has no
/// letters, so `Docs/*.yml` still finds `docs/a.yml`: the walk starts
/// higher and the case-insensitive matcher decides. Absolute patterns use
/// their directory prefix as written.
fn resolve_include(root: &Path, pattern: &str, matcher: &GlobMatcher) -> Vec<(String, PathBuf)> {
    let absolute = Path::new(pattern).is_absolute();
    let components: Vec<&str> = pattern.split('/').collect();
    // The final component names files, never the walk root.
    let dirs = components.len().saturating_sub(1);
    let literal_len = components[..dirs]
        .iter()
        .take_while(|c| {
            !c.contains(GLOB_META) && (absolute || !c.chars().any(char::is_alphabetic))
        })
        .count();

    let prefix = components[..literal_len].join("/");
    let walk_root = if absolute {
        if prefix.is_empty() {
            PathBuf::from("/")
        } else {
            PathBuf::from(&prefix)
        }
    } else if prefix.is_empty() {
        root.to_path_buf()
    } else {
        root.join(&prefix)
    };

    let remainder = &components[literal_len..];
    let mut walker = WalkDir::new(&walk_root).follow_links(true);
    if !remainder.iter().any(|c| c.contains("**")) {
        walker = walker.max_depth(remainder.len());
    }

    walker
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.into_path();
            let matched = if absolute {
                to_slash(&path)
            } else {
                to_slash(path.strip_prefix(root).ok()?)
            };
            if !matcher.is_match(&matched) {
                return None;
            }
            engine_trace!("discovery: {} matched {}", matched, pattern);
            Some((matched, path))
        })
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR_STR, "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braces_expand_including_empty_alternatives() {
        assert_eq!(expand_braces("*.y{a,}ml"), vec!["*.yaml", "*.yml"]);
        assert_eq!(
            expand_braces("{docs,guides}/*.{yml,cff}"),
            vec!["docs/*.yml", "docs/*.cff", "guides/*.yml", "guides/*.cff"]
        );
        assert_eq!(expand_braces("a{b,{c,d}}"), vec!["ab", "ac", "ad"]);
    }

    #[test]
    fn unbalanced_or_escaped_braces_are_kept() {
        assert_eq!(expand_braces("a{b"), vec!["a{b"]);
        assert_eq!(expand_braces(r"a\{b,c\}"), vec![r"a\{b,c\}"]);
        assert_eq!(expand_braces("plain.yml"), vec!["plain.yml"]);
    }
}
