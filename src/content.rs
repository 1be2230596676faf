// Static project content shown on the carousel cards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Image path relative to the site root.
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Project {
    fn new(title: &str, description: &str, image: &str, tags: &[&str], link: &str) -> Self {
        Project {
            title: title.to_string(),
            description: description.to_string(),
            image: image.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            link: Some(link.to_string()),
        }
    }
}

pub fn default_projects() -> Vec<Project> {
    vec![
        Project::new(
            "Mountain Explorer",
            "An immersive 3D experience showcasing the beauty of mountain landscapes with realistic terrain.",
            "/images/decorations/knott.png",
            &["Three.js", "React", "WebGL"],
            "#",
        ),
        Project::new(
            "Prayer Wheel App",
            "A meditative mobile application featuring traditional Tibetan prayer wheels and mantras.",
            "/images/decorations/prayerflags.png",
            &["React Native", "Expo"],
            "#",
        ),
        Project::new(
            "Stupa Gallery",
            "Virtual tour of ancient Buddhist stupas and monuments from around the world.",
            "/images/decorations/stupa.png",
            &["Next.js", "Framer"],
            "#",
        ),
        Project::new(
            "Himalayan Trails",
            "Interactive map and guide for trekking routes in the Himalayas with elevation data.",
            "/images/decorations/prayerflag2.png",
            &["Mapbox", "Node.js"],
            "#",
        ),
    ]
}
