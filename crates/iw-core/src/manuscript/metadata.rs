use serde::{Deserialize, Serialize};

/// Genre declared by the author during upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    Fantasy,
    ScienceFiction,
    Romance,
    Mystery,
    Thriller,
    LiteraryFiction,
    YoungAdult,
    NonFiction,
    Memoir,
    Other,
}

/// Where the work stands on its road to publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicationStatus {
    Unpublished,
    Querying,
    SelfPublished,
    TraditionallyPublished,
}
