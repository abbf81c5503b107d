//! Foreground signal parsing
//!
//! The service reads one signal per line from its foreground source:
//! a package identifier, optionally followed by a tab and the candidate
//! URL extracted from the foreground UI. An empty field means "unknown".
//! A blank line is the neutral signal (nothing relevant in front).

/// Parsed foreground signal: (package identifier, candidate URL)
pub type ForegroundSignal = (Option<String>, Option<String>);

pub fn parse_signal(line: &str) -> ForegroundSignal {
    let line = line.trim_end_matches(['\r', '\n']);

    let (package, url) = match line.split_once('\t') {
        Some((package, url)) => (package, Some(url)),
        None => (line, None),
    };

    let package = if package.is_empty() {
        None
    } else {
        Some(package.to_string())
    };
    let url = url.filter(|u| !u.is_empty()).map(|u| u.to_string());

    (package, url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_only() {
        assert_eq!(
            parse_signal("com.example.app"),
            (Some("com.example.app".to_string()), None)
        );
    }

    #[test]
    fn package_and_url() {
        assert_eq!(
            parse_signal("com.android.chrome\thttps://youtube.com/watch"),
            (
                Some("com.android.chrome".to_string()),
                Some("https://youtube.com/watch".to_string())
            )
        );
    }

    #[test]
    fn blank_line_is_neutral() {
        assert_eq!(parse_signal(""), (None, None));
        assert_eq!(parse_signal("\n"), (None, None));
    }

    #[test]
    fn empty_url_field_is_none() {
        assert_eq!(
            parse_signal("com.android.chrome\t"),
            (Some("com.android.chrome".to_string()), None)
        );
    }

    #[test]
    fn trailing_newline_stripped() {
        assert_eq!(
            parse_signal("com.example.app\r\n"),
            (Some("com.example.app".to_string()), None)
        );
    }
}
