use serde::Deserialize;

const MAX_TITLE_LENGTH: usize = 50;

/// Body for movie create/update/patch. Create and PUT require every field;
/// PATCH requires at least one. The two `validate` flavors enforce that
/// split.
#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    #[serde(rename = "movieTitle")]
    pub movie_title: Option<String>,
    pub year: Option<i32>,
    pub image: Option<String>,
}

/// Validated full movie input (create and PUT).
#[derive(Debug)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub image_url: String,
}

/// Validated partial movie input (PATCH): at least one field is present.
#[derive(Debug)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub image_url: Option<String>,
}

fn check_title(title: &str, violations: &mut Vec<String>) {
    if title.chars().count() > MAX_TITLE_LENGTH {
        violations.push(format!(
            "movieTitle must be at most {MAX_TITLE_LENGTH} characters!"
        ));
    }
}

fn check_year(year: i32, violations: &mut Vec<String>) {
    // The original contract: the year must print as exactly four digits.
    if !(1000..=9999).contains(&year) {
        violations.push("year must be a 4 digit number!".into());
    }
}

fn check_image(image: &str, violations: &mut Vec<String>) {
    if !image.starts_with("http://") && !image.starts_with("https://") {
        violations.push("image must start with http:// or https://!".into());
    }
}

impl MovieRequest {
    pub fn validate(self) -> Result<NewMovie, Vec<String>> {
        let mut violations = Vec::new();

        let title = self
            .movie_title
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        if title.is_empty() {
            violations.push("movieTitle is a required field!".into());
        } else {
            check_title(&title, &mut violations);
        }

        let year = match self.year {
            None => {
                violations.push("year is a required field!".into());
                0
            }
            Some(year) => {
                check_year(year, &mut violations);
                year
            }
        };

        let image_url = self.image.as_deref().unwrap_or_default().trim().to_string();
        if image_url.is_empty() {
            violations.push("image is a required field!".into());
        } else {
            check_image(&image_url, &mut violations);
        }

        if violations.is_empty() {
            Ok(NewMovie {
                title,
                year,
                image_url,
            })
        } else {
            Err(violations)
        }
    }

    pub fn validate_patch(self) -> Result<MoviePatch, Vec<String>> {
        let title = self
            .movie_title
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let image_url = self
            .image
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        if title.is_none() && self.year.is_none() && image_url.is_none() {
            return Err(vec![
                "On patch method, at least one field should be provided: movieTitle, year, image!"
                    .into(),
            ]);
        }

        let mut violations = Vec::new();
        if let Some(title) = title.as_deref() {
            check_title(title, &mut violations);
        }
        if let Some(year) = self.year {
            check_year(year, &mut violations);
        }
        if let Some(image_url) = image_url.as_deref() {
            check_image(image_url, &mut violations);
        }

        if violations.is_empty() {
            Ok(MoviePatch {
                title,
                year: self.year,
                image_url,
            })
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: Option<&str>, year: Option<i32>, image: Option<&str>) -> MovieRequest {
        MovieRequest {
            movie_title: title.map(str::to_string),
            year,
            image: image.map(str::to_string),
        }
    }

    #[test]
    fn full_request_validates_and_trims() {
        let movie = request(Some("  Inception "), Some(2010), Some("https://x"))
            .validate()
            .expect("valid movie");
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.year, 2010);
        assert_eq!(movie.image_url, "https://x");
    }

    #[test]
    fn all_missing_fields_are_reported() {
        let violations = request(None, None, None)
            .validate()
            .expect_err("nothing provided");
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn year_must_have_exactly_four_digits() {
        for year in [999, 10_000, 0, -2010] {
            let violations = request(Some("Inception"), Some(year), Some("https://x"))
                .validate()
                .expect_err("bad year");
            assert!(violations[0].contains("4 digit"));
        }
        assert!(request(Some("Inception"), Some(1000), Some("https://x"))
            .validate()
            .is_ok());
        assert!(request(Some("Inception"), Some(9999), Some("https://x"))
            .validate()
            .is_ok());
    }

    #[test]
    fn image_must_be_http_or_https() {
        let violations = request(Some("Inception"), Some(2010), Some("ftp://x"))
            .validate()
            .expect_err("bad scheme");
        assert!(violations[0].contains("http://"));

        assert!(request(Some("Inception"), Some(2010), Some("http://x"))
            .validate()
            .is_ok());
    }

    #[test]
    fn over_long_title_is_rejected() {
        let long = "x".repeat(51);
        let violations = request(Some(&long), Some(2010), Some("https://x"))
            .validate()
            .expect_err("long title");
        assert!(violations[0].contains("at most 50"));
    }

    #[test]
    fn patch_requires_at_least_one_field() {
        let violations = request(None, None, None)
            .validate_patch()
            .expect_err("empty patch");
        assert!(violations[0].contains("at least one field"));
    }

    #[test]
    fn patch_with_single_field_passes() {
        let patch = request(None, Some(1999), None)
            .validate_patch()
            .expect("year-only patch");
        assert_eq!(patch.year, Some(1999));
        assert!(patch.title.is_none());
        assert!(patch.image_url.is_none());
    }

    #[test]
    fn patch_still_validates_present_fields() {
        let violations = request(None, Some(99), None)
            .validate_patch()
            .expect_err("bad year in patch");
        assert!(violations[0].contains("4 digit"));
    }
}
