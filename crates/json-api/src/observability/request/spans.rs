//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Replace UUID path segments with `{uuid}` to keep label cardinality bounded.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_templated() {
        assert_eq!(
            route_template("/sessions/0192d4e0-7b3a-7c1e-9f00-5a6b7c8d9e0f/renew"),
            "/sessions/{uuid}/renew"
        );
    }

    #[test]
    fn plain_paths_are_kept() {
        assert_eq!(route_template("/rebates/quote"), "/rebates/quote");
        assert_eq!(route_template("/"), "/");
    }
}
