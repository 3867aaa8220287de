use crate::models::TasteProfile;

/// Literal rendered in place of the watched-item lines for new users
pub const NO_WATCHED_PLACEHOLDER: &str = "No content watched yet.";

/// Renders the collected profile into the single generation prompt
///
/// Pure function of the profile. The model is instructed to reply with a
/// JSON array of objects carrying exactly the keys `title`, `type` and
/// `description`, and to keep suggestions distinct from the watched content.
pub fn build_prompt(profile: &TasteProfile) -> String {
    let watched = if profile.watched_lines.is_empty() {
        NO_WATCHED_PLACEHOLDER.to_string()
    } else {
        profile.watched_lines.join("\n")
    };

    format!(
        r#"The user has watched and rated the following content:
{watched}

Their preferred languages are: {languages}
Their preferred genres are: {genres}

Based on this information, recommend 5-10 movies or TV shows.
For each recommendation, provide only the title, type (movie/tv_show), and a very brief one-sentence description.
Format your response as a JSON array of objects, like this:
[
  {{ "title": "Movie Title 1", "type": "movie", "description": "Brief description." }},
  {{ "title": "TV Show Title 1", "type": "tv_show", "description": "Brief description." }}
]
Ensure the recommendations are distinct from the watched content and align with their preferences."#,
        languages = profile.preferred_languages,
        genres = profile.preferred_genres,
    )
}
