//! URL path joining with the same semantics the server extension uses when
//! mounting its routes.
//!
//! The server joins `base_url + namespace + endpoint` into route patterns;
//! the client must produce byte-identical URLs or requests miss the handler
//! (notably under JupyterHub, where the base URL carries a `/user/<name>/`
//! prefix).

/// Join URL pieces with exactly one `/` at each join point.
///
/// Slashes at the seams are collapsed, empty pieces are skipped, a leading
/// slash on the first piece and a trailing slash on the last piece are
/// preserved, and query strings pass through untouched.
pub fn url_path_join(pieces: &[&str]) -> String {
    if pieces.is_empty() {
        return String::new();
    }

    let leading = pieces[0].starts_with('/');
    let trailing = pieces[pieces.len() - 1].ends_with('/');

    let stripped: Vec<&str> = pieces
        .iter()
        .map(|piece| piece.trim_matches('/'))
        .filter(|piece| !piece.is_empty())
        .collect();

    let mut result = stripped.join("/");
    if leading {
        result.insert(0, '/');
    }
    if trailing {
        result.push('/');
    }
    if result == "//" {
        result = "/".to_string();
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_slashes() {
        assert_eq!(
            url_path_join(&["http://localhost:8888/", "jupysec", "scorecard_update"]),
            "http://localhost:8888/jupysec/scorecard_update"
        );
    }

    #[test]
    fn base_without_trailing_slash() {
        assert_eq!(
            url_path_join(&["http://localhost:8888", "jupysec", "scorecard_update"]),
            "http://localhost:8888/jupysec/scorecard_update"
        );
    }

    #[test]
    fn endpoint_with_leading_slash_does_not_double() {
        assert_eq!(
            url_path_join(&["http://localhost:8888/", "jupysec", "/scorecard_update"]),
            "http://localhost:8888/jupysec/scorecard_update"
        );
    }

    #[test]
    fn empty_endpoint_resolves_to_namespace_root() {
        assert_eq!(
            url_path_join(&["http://localhost:8888/", "jupysec", ""]),
            "http://localhost:8888/jupysec"
        );
    }

    #[test]
    fn query_string_is_preserved() {
        assert_eq!(
            url_path_join(&["http://localhost:8888/", "jupysec", "scorecard_update?force=1"]),
            "http://localhost:8888/jupysec/scorecard_update?force=1"
        );
    }

    #[test]
    fn hub_style_base_with_prefix() {
        assert_eq!(
            url_path_join(&["https://hub.example.org/user/alice/", "jupysec", "scorecard_update"]),
            "https://hub.example.org/user/alice/jupysec/scorecard_update"
        );
    }

    #[test]
    fn trailing_slash_on_last_piece_is_kept() {
        assert_eq!(
            url_path_join(&["http://localhost:8888/", "jupysec", "public/"]),
            "http://localhost:8888/jupysec/public/"
        );
    }

    #[test]
    fn relative_pieces_keep_leading_slash_of_first() {
        assert_eq!(url_path_join(&["/base/", "jupysec"]), "/base/jupysec");
        assert_eq!(url_path_join(&["/", ""]), "/");
    }
}
