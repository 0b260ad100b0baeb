//! Serde models for the slice of the media-server JSON API this tool reads.
//! Every response nests its payload inside a `MediaContainer` envelope.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SectionsResponse {
    #[serde(rename = "MediaContainer")]
    pub container: SectionsContainer,
}

#[derive(Debug, Deserialize)]
pub struct SectionsContainer {
    #[serde(rename = "Directory", default)]
    pub directories: Vec<Directory>,
}

#[derive(Debug, Deserialize)]
pub struct Directory {
    pub key: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct CollectionsResponse {
    #[serde(rename = "MediaContainer")]
    pub container: CollectionsContainer,
}

#[derive(Debug, Deserialize)]
pub struct CollectionsContainer {
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<CollectionMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionMetadata {
    #[serde(rename = "ratingKey")]
    pub rating_key: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct PostersResponse {
    #[serde(rename = "MediaContainer")]
    pub container: PostersContainer,
}

#[derive(Debug, Deserialize)]
pub struct PostersContainer {
    #[serde(rename = "Metadata", default)]
    pub posters: Vec<PosterEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PosterEntry {
    pub key: String,
    #[serde(default)]
    pub selected: bool,
}
