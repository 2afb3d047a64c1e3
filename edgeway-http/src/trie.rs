// Copyright 2026 The edgeway Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The URL-template routing trie.
//!
//! `Insert` registers a pattern with literal and `{variable}` segments;
//! `Search` finds the single pattern that best matches a concrete path,
//! with literal children dominating variable children at every level and
//! insertion order breaking ties among variable siblings. The trailing
//! slash forgiveness rule (`/xyz/` matching a registered `/xyz`) is the
//! trickiest part, see `match_node` below.

use edgeway_error::Error;
use std::collections::HashMap;

/// One node of the trie. `variable_children` is a `Vec` rather than a map
/// so variable siblings can be iterated in insertion order.
#[derive(Debug, Default)]
struct Node {
    literal_children: HashMap<String, Node>,
    variable_children: Vec<(String, Node)>,
    is_endpoint: bool,
    pattern: Option<String>,
}

/// The result of [`EndpointTrie::search`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchResult {
    pub found: bool,
    pub pattern: String,
    pub variables: HashMap<String, String>,
}

impl MatchResult {
    fn not_found() -> Self {
        MatchResult::default()
    }

    fn found(pattern: String, variables: HashMap<String, String>) -> Self {
        MatchResult {
            found: true,
            pattern,
            variables,
        }
    }
}

/// A trie of registered URL templates.
#[derive(Debug, Default)]
pub struct EndpointTrie {
    root: Node,
    patterns: Vec<String>,
}

enum SegmentKind {
    Literal(String),
    Variable(String),
    /// The trailing-slash marker: an empty segment.
    Sentinel,
}

/// Split `path` into segments: strip a leading `/`, drop segments made
/// empty by consecutive slashes, and preserve exactly one trailing
/// sentinel empty segment iff the original path ended in `/` and wasn't
/// just `"/"`.
fn tokenize(path: &str) -> Vec<String> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let has_trailing_slash = path.ends_with('/') && path != "/";

    let mut segments: Vec<String> = trimmed
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    if has_trailing_slash {
        segments.push(String::new());
    }
    segments
}

fn classify(segment: &str) -> Result<SegmentKind, String> {
    if segment.is_empty() {
        return Ok(SegmentKind::Sentinel);
    }

    let has_brace = segment.contains('{') || segment.contains('}');
    if segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}') {
        let name = &segment[1..segment.len() - 1];
        if name.is_empty() || name.contains('{') || name.contains('}') {
            return Err(format!("empty or malformed variable name in {segment:?}"));
        }
        return Ok(SegmentKind::Variable(name.to_string()));
    }

    if has_brace {
        return Err(format!("unbalanced braces in segment {segment:?}"));
    }

    Ok(SegmentKind::Literal(segment.to_string()))
}

impl EndpointTrie {
    pub fn new() -> Self {
        EndpointTrie::default()
    }

    /// Register `pattern`. Re-inserting the same pattern is a no-op beyond
    /// confirming it's still marked as an endpoint.
    pub fn insert(&mut self, pattern: &str) -> Result<(), Error> {
        let segments = tokenize(pattern);

        let mut seen_variables = std::collections::HashSet::new();
        let mut kinds = Vec::with_capacity(segments.len());
        for segment in &segments {
            let kind = classify(segment)
                .map_err(|detail| Error::invalid_pattern(pattern.to_string(), detail))?;
            if let SegmentKind::Variable(name) = &kind {
                if !seen_variables.insert(name.clone()) {
                    return Err(Error::invalid_pattern(
                        pattern.to_string(),
                        format!("duplicate variable name {name:?}"),
                    ));
                }
            }
            kinds.push(kind);
        }

        let mut node = &mut self.root;
        for kind in kinds {
            node = match kind {
                SegmentKind::Literal(text) => node.literal_children.entry(text).or_default(),
                SegmentKind::Sentinel => node.literal_children.entry(String::new()).or_default(),
                SegmentKind::Variable(name) => {
                    let pos = node.variable_children.iter().position(|(n, _)| *n == name);
                    let pos = pos.unwrap_or_else(|| {
                        node.variable_children.push((name, Node::default()));
                        node.variable_children.len() - 1
                    });
                    &mut node.variable_children[pos].1
                }
            };
        }
        node.is_endpoint = true;
        node.pattern = Some(pattern.to_string());

        if !self.patterns.iter().any(|p| p == pattern) {
            self.patterns.push(pattern.to_string());
        }
        tracing::debug!(pattern, "registered endpoint pattern");
        Ok(())
    }

    /// Find the pattern that best matches `path`, extracting variable
    /// bindings along the way.
    pub fn search(&self, path: &str) -> MatchResult {
        let segments = tokenize(path);
        let mut variables = HashMap::new();
        let result = match_node(&self.root, &segments, &mut variables);
        let outcome = match result {
            Some(pattern) => MatchResult::found(pattern, variables),
            None => MatchResult::not_found(),
        };
        tracing::debug!(path, found = outcome.found, "trie search");
        outcome
    }

    /// All patterns registered so far, in insertion order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Depth-first, backtracking match over `segments` starting at `node`.
/// Returns the matched pattern, if any. `variables` accumulates bindings
/// along the path actually taken; callers can check `variables.is_empty()`
/// at any point to know whether a capture has happened so far on this path.
fn match_node(node: &Node, segments: &[String], variables: &mut HashMap<String, String>) -> Option<String> {
    let Some((segment, rest)) = segments.split_first() else {
        return if node.is_endpoint {
            node.pattern.clone()
        } else {
            None
        };
    };

    let is_trailing_sentinel = segment.is_empty() && rest.is_empty();

    if is_trailing_sentinel {
        // First, try the normal child lookup: an explicitly registered
        // trailing-slash pattern has a literal "" child here.
        if let Some(child) = node.literal_children.get("") {
            if let Some(found) = match_node(child, rest, variables) {
                return Some(found);
            }
        }
        // Otherwise, forgive the trailing slash iff this node is itself an
        // endpoint and no variable has been bound getting here.
        return if node.is_endpoint && variables.is_empty() {
            node.pattern.clone()
        } else {
            None
        };
    }

    // Literal children dominate variable children at every level.
    if let Some(child) = node.literal_children.get(segment) {
        if let Some(found) = match_node(child, rest, variables) {
            return Some(found);
        }
    }

    for (name, child) in &node.variable_children {
        let previous = variables.insert(name.clone(), segment.clone());
        if let Some(found) = match_node(child, rest, variables) {
            return Some(found);
        }
        match previous {
            Some(value) => {
                variables.insert(name.clone(), value);
            }
            None => {
                variables.remove(name);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_for_pattern_without_variables() {
        let mut trie = EndpointTrie::new();
        trie.insert("/a/b").unwrap();
        let result = trie.search("/a/b");
        assert!(result.found);
        assert_eq!(result.pattern, "/a/b");
        assert!(result.variables.is_empty());
    }

    #[test]
    fn variable_capture() {
        let mut trie = EndpointTrie::new();
        trie.insert("/a/{x}/b").unwrap();
        let result = trie.search("/a/v/b");
        assert!(result.found);
        assert_eq!(result.pattern, "/a/{x}/b");
        assert_eq!(result.variables.get("x"), Some(&"v".to_string()));

        assert!(!trie.search("/a/v/c").found);
    }

    #[test]
    fn literal_dominates_variable() {
        let mut trie = EndpointTrie::new();
        trie.insert("/a/{x}").unwrap();
        trie.insert("/a/b").unwrap();
        let result = trie.search("/a/b");
        assert_eq!(result.pattern, "/a/b");
    }

    #[test]
    fn trailing_slash_forgives_when_no_captures() {
        let mut trie = EndpointTrie::new();
        trie.insert("/xyz").unwrap();
        let result = trie.search("/xyz/");
        assert!(result.found);
        assert_eq!(result.pattern, "/xyz");
    }

    #[test]
    fn trailing_slash_forbidden_after_capture() {
        let mut trie = EndpointTrie::new();
        trie.insert("/api/user/{userId}").unwrap();
        assert!(!trie.search("/api/user/123/").found);
    }

    #[test]
    fn explicit_trailing_slash_pattern_is_distinct() {
        let mut trie = EndpointTrie::new();
        trie.insert("/xyz/").unwrap();
        let result = trie.search("/xyz/");
        assert!(result.found);
        assert_eq!(result.pattern, "/xyz/");
        // And without a trailing slash it does not match the `/xyz/` pattern.
        assert!(!trie.search("/xyz").found);
    }

    #[test]
    fn multiple_variables() {
        let mut trie = EndpointTrie::new();
        trie.insert("/hello/{a}/{b}/{c}").unwrap();
        let result = trie.search("/hello/x/y/z");
        assert!(result.found);
        assert_eq!(result.variables.get("a"), Some(&"x".to_string()));
        assert_eq!(result.variables.get("b"), Some(&"y".to_string()));
        assert_eq!(result.variables.get("c"), Some(&"z".to_string()));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut trie = EndpointTrie::new();
        trie.insert("/a/b").unwrap();
        trie.insert("/a/b").unwrap();
        assert_eq!(trie.patterns().len(), 1);
    }

    #[test]
    fn rejects_unbalanced_braces() {
        let mut trie = EndpointTrie::new();
        assert!(trie.insert("/a/{x").is_err());
        assert!(trie.insert("/a/x}").is_err());
    }

    #[test]
    fn rejects_duplicate_variable_names() {
        let mut trie = EndpointTrie::new();
        assert!(trie.insert("/a/{x}/{x}").is_err());
    }

    #[test]
    fn double_slash_collapses_to_single_segment() {
        let mut trie = EndpointTrie::new();
        trie.insert("/a/b").unwrap();
        assert!(trie.search("/a//b").found);
    }
}
