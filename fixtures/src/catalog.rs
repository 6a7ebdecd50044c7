use crate::model::Organization;

const ORGANIZATIONS: [(&str, &str, &str); 3] = [
    ("org-1", "Acme Corp", "acme-corp"),
    ("org-2", "Global Industries", "global-ind"),
    ("org-3", "TechNova", "technova"),
];

/// Static list of organizations the dashboard can switch between.
pub fn organizations() -> Vec<Organization> {
    ORGANIZATIONS
        .iter()
        .map(|(id, name, slug)| Organization {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
        })
        .collect()
}

pub fn find_organization(org_id: &str) -> Option<Organization> {
    organizations().into_iter().find(|org| org.id == org_id)
}

/// Organization selected when a session starts.
pub fn default_organization() -> Organization {
    let (id, name, slug) = ORGANIZATIONS[0];
    Organization {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
    }
}
