use std::collections::BTreeMap;

use askama::Template;

use crate::models::profile::Profile;
use crate::models::resources::{Curriculum, UsefulLink};
use crate::notice::Notice;
use crate::services::curricula::MAX_CURRICULUM_BYTES;

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileView {
    pub notice: Option<Notice>,
    pub profile: Profile,
}

pub struct LinkGroup {
    pub category: String,
    pub links: Vec<UsefulLink>,
}

#[derive(Template)]
#[template(path = "links.html")]
pub struct LinksView {
    pub groups: Vec<LinkGroup>,
}

impl From<BTreeMap<String, Vec<UsefulLink>>> for LinksView {
    fn from(groups: BTreeMap<String, Vec<UsefulLink>>) -> Self {
        Self {
            groups: groups
                .into_iter()
                .map(|(category, links)| LinkGroup { category, links })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "curricula.html")]
pub struct CurriculaView {
    pub notice: Option<Notice>,
    pub curricula: Vec<Curriculum>,
    pub max_mb: usize,
}

impl CurriculaView {
    pub fn new(curricula: Vec<Curriculum>, notice: Option<Notice>) -> Self {
        Self {
            notice,
            curricula,
            max_mb: MAX_CURRICULUM_BYTES / (1024 * 1024),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::UserRole;
    use crate::services::links::group_by_category;

    #[test]
    fn test_profile_renders_optional_fields() {
        let view = ProfileView {
            notice: None,
            profile: Profile {
                id: "c1".to_string(),
                role: UserRole::Candidate,
                display_name: "Ana".to_string(),
                email: "ana@mail.test".to_string(),
                headline: Some("Data analyst".to_string()),
                location: None,
                avatar_url: None,
                website: None,
            },
        };
        let html = view.render().unwrap();
        assert!(html.contains(r#"value="Data analyst""#));
        assert!(html.contains(r#"name="location" value="""#));
    }

    #[test]
    fn test_links_grouped_alphabetically() {
        let link = |id: &str, category: Option<&str>| UsefulLink {
            id: id.to_string(),
            title: format!("Link {id}"),
            url: "https://example.org".to_string(),
            category: category.map(str::to_string),
            description: None,
        };
        let view = LinksView::from(group_by_category(vec![
            link("1", Some("Salaries")),
            link("2", None),
            link("3", Some("Interviews")),
        ]));
        let categories: Vec<&str> = view.groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["General", "Interviews", "Salaries"]);
        assert!(view.render().unwrap().contains("Link 3"));
    }

    #[test]
    fn test_curricula_upload_form_states_limit() {
        let html = CurriculaView::new(vec![], None).render().unwrap();
        assert!(html.contains("5 MB"));
        assert!(html.contains(r#"data-state="empty-all""#));
    }
}
