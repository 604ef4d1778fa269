//! Title detail parser for OMDB
//!
//! Parses the `?i=` endpoint envelope into a [`MovieDetail`].

use super::Envelope;
use crate::error::Result;
use crate::types::MovieDetail;

/// Parse a detail response body.
///
/// # Returns
/// * `Ok(MovieDetail)` for a `Response: "True"` envelope
/// * `Err(UpviewError::NotFound)` for a `Response: "False"` envelope
/// * `Err(UpviewError::ParseError)` if the body is not a detail envelope
pub fn parse_movie_detail(body: &str) -> Result<MovieDetail> {
    let envelope: Envelope = serde_json::from_str(body)?;
    envelope.into_result("Title not found")?;
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpviewError;
    use crate::types::MediaType;

    const MATRIX_DETAIL: &str = r#"{
        "Title":"The Matrix","Year":"1999","Rated":"R","Released":"31 Mar 1999",
        "Runtime":"136 min","Genre":"Action, Sci-Fi",
        "Director":"Lana Wachowski, Lilly Wachowski","Writer":"Lilly Wachowski, Lana Wachowski",
        "Actors":"Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss",
        "Plot":"When a beautiful stranger leads computer hacker Neo to a forbidding underworld...",
        "Language":"English","Country":"United States, Australia","Awards":"Won 4 Oscars",
        "Poster":"https://example.com/matrix.jpg",
        "Ratings":[{"Source":"Internet Movie Database","Value":"8.7/10"}],
        "Metascore":"73","imdbRating":"8.7","imdbVotes":"2,100,000","imdbID":"tt0133093",
        "Type":"movie","DVD":"N/A","BoxOffice":"$172,076,928","Production":"N/A","Website":"N/A",
        "Response":"True"
    }"#;

    #[test]
    fn test_parse_detail() {
        let detail = parse_movie_detail(MATRIX_DETAIL).unwrap();
        assert_eq!(detail.imdb_id, "tt0133093");
        assert_eq!(detail.title, "The Matrix");
        assert_eq!(detail.media_type, MediaType::Movie);
        assert_eq!(detail.runtime.as_deref(), Some("136 min"));
        assert_eq!(detail.rating(), Some(8.7));
        assert_eq!(detail.genres(), vec!["Action", "Sci-Fi"]);
        assert!(detail.plot.unwrap().starts_with("When a beautiful stranger"));
    }

    #[test]
    fn test_parse_detail_not_available_fields() {
        let body = r#"{"Title":"Tiny","Year":"2020","imdbID":"tt9","Type":"movie",
            "Runtime":"N/A","imdbRating":"N/A","Poster":"N/A","Response":"True"}"#;
        let detail = parse_movie_detail(body).unwrap();
        assert!(detail.runtime.is_none());
        assert!(detail.rating().is_none());
        assert!(detail.poster_url().is_none());
        assert!(detail.director.is_none());
    }

    #[test]
    fn test_parse_detail_failure_envelope() {
        let body = r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#;
        match parse_movie_detail(body) {
            Err(UpviewError::NotFound(msg)) => assert_eq!(msg, "Incorrect IMDb ID."),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_detail_missing_response_field() {
        let result = parse_movie_detail(r#"{"Title":"x"}"#);
        assert!(matches!(result, Err(UpviewError::ParseError(_))));
    }
}
