use serde::{Deserialize, Serialize};

/// Post category. The wire value is the lowercase variant name; values
/// outside this list read as `Uncategorized`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Movies,
    News,
    Series,
    Anime,
    Kdrama,
    #[default]
    #[serde(other)]
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Uncategorized,
        Category::Movies,
        Category::News,
        Category::Series,
        Category::Anime,
        Category::Kdrama,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Uncategorized => "Select a category",
            Category::Movies => "Movies",
            Category::News => "News",
            Category::Series => "Series",
            Category::Anime => "Anime",
            Category::Kdrama => "K-drama",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Cycles to the next category (wraps around)
    pub fn next(self) -> Category {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Cycles to the previous category (wraps around)
    pub fn prev(self) -> Category {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A stored post as returned by `GET /post/getposts`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Body of create and update requests.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Success body of create and update.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PublishedPost {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub slug: String,
}

#[derive(Deserialize, Debug)]
pub(super) struct PostList {
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Error body returned by the content API.
#[derive(Deserialize, Debug)]
pub(super) struct ApiMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_values() {
        assert_eq!(serde_json::to_string(&Category::Kdrama).unwrap(), "\"kdrama\"");
        let c: Category = serde_json::from_str("\"movies\"").unwrap();
        assert_eq!(c, Category::Movies);
        let c: Category = serde_json::from_str("\"reviews\"").unwrap();
        assert_eq!(c, Category::Uncategorized);
        assert_eq!(
            serde_json::to_string(&Category::Uncategorized).unwrap(),
            "\"uncategorized\""
        );
    }

    #[test]
    fn test_category_cycles_both_ways() {
        assert_eq!(Category::Uncategorized.next(), Category::Movies);
        assert_eq!(Category::Kdrama.next(), Category::Uncategorized);
        assert_eq!(Category::Uncategorized.prev(), Category::Kdrama);
        for c in Category::ALL {
            assert_eq!(c.next().prev(), c);
        }
    }

    #[test]
    fn test_payload_omits_missing_image() {
        let payload = PostPayload {
            title: "A".to_string(),
            content: "<p>x</p>".to_string(),
            category: Category::Movies,
            image: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "A", "content": "<p>x</p>", "category": "movies"})
        );
    }

    #[test]
    fn test_post_parses_server_shape() {
        let post: Post = serde_json::from_str(
            r#"{"_id":"p1","userId":"u1","title":"A","content":"<p>x</p>",
                "category":"movies","image":"https://img/a.png","slug":"a","__v":0}"#,
        )
        .unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.user_id.as_deref(), Some("u1"));
        assert_eq!(post.category, Category::Movies);
        assert_eq!(post.slug.as_deref(), Some("a"));
    }
}
