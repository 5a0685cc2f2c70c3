//! Domain types shared by the vector store and the scoring engine.

use serde::{Deserialize, Serialize};

/// Stable identifier of a recommendable place.
pub type EntityId = i64;

/// Semantic facet a keyword belongs to. Each variant maps 1:1 to a vector
/// collection; [`Category::FoodProduct`] is the primary facet and receives
/// multiplicative weighting during scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FoodProduct,
    AmbienceSpace,
    ServiceStaff,
    PriceValue,
    Accessibility,
    VisitPurpose,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::FoodProduct,
        Category::AmbienceSpace,
        Category::ServiceStaff,
        Category::PriceValue,
        Category::Accessibility,
        Category::VisitPurpose,
    ];

    /// The facet whose matches are scaled up by the weight policy.
    pub const PRIMARY: Category = Category::FoodProduct;

    /// Name of the backing vector collection.
    pub fn collection_name(self) -> &'static str {
        match self {
            Category::FoodProduct => "food_product",
            Category::AmbienceSpace => "ambience_space",
            Category::ServiceStaff => "service_staff",
            Category::PriceValue => "price_value",
            Category::Accessibility => "accessibility",
            Category::VisitPurpose => "visit_purpose",
        }
    }

    /// Inverse of [`Category::collection_name`]. Unknown labels are rejected
    /// rather than mapped through.
    pub fn from_collection_name(name: &str) -> Option<Self> {
        Category::ALL.iter().copied().find(|c| c.collection_name() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection_name())
    }
}

/// One extracted keyword, embedded: the unit of fan-out.
#[derive(Debug, Clone)]
pub struct QueryTerm {
    pub category: Category,
    pub vector: Vec<f32>,
}

/// One candidate match returned by a per-category vector lookup.
///
/// `distance` is cosine distance in `[0, 2]`; lower is closer. The store
/// guarantees `category` equals the category that was searched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub entity_id: EntityId,
    pub keyword: String,
    pub category: Category,
    pub distance: f32,
}

/// Externally visible recommendation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: EntityId,
    pub similarity_score: f32,
    pub keywords: Vec<String>,
}

/// Full response surface: ranked recommendations plus the caller-supplied
/// place-category hint echoed back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
    pub place_category: Option<String>,
}
