//! Page builders: the document trees for the home and contact pages.
//!
//! Pure markup-shaped data, no translation logic. Every translatable node is
//! tagged with its key; the engine fills the strings in during the apply
//! pass. Builders are also what collaborators use to mount late content (the
//! Swiss prompt) before asking the engine for a subtree pass.

use crate::dom::{Document, Node};
use crate::i18n::Language;

/// The home page: navigation, hero, services, catalog, social, footer.
pub fn home() -> Document {
    let mut doc = Document::new("/");
    doc.body = Node::container(vec![
        navigation(),
        hero(),
        services(),
        catalog(),
        social(),
        footer(),
    ]);
    doc
}

/// The contact page: navigation, contact form, footer.
pub fn contact() -> Document {
    let mut doc = Document::new("/kontakt");
    doc.body = Node::container(vec![
        navigation(),
        Node::container(vec![
            Node::text("contact.title"),
            Node::text("contact.subtitle"),
            Node::input("contact.form.name"),
            Node::input("contact.form.email"),
            Node::input("contact.form.phone"),
            Node::input("contact.form.message"),
            Node::submit("contact.form.submit"),
            Node::tooltip("contact.phone_tooltip", "+41 79 778 48 61"),
        ]),
        footer(),
    ]);
    doc
}

/// The Swiss language-selection prompt subtree, mounted on demand.
pub fn swiss_prompt() -> Node {
    let mut options: Vec<Node> = Vec::new();
    // Swiss German is offered first, then the remaining languages.
    for language in [
        Language::SWISS_GERMAN,
        Language::GERMAN,
        Language::FRENCH,
        Language::ENGLISH,
    ] {
        let key_base = swiss_option_key(language);
        options.push(
            Node::language_option(language.code()).with_children(vec![
                Node::text(&format!("swiss_modal.{}", key_base)),
                Node::text(&format!("swiss_modal.{}_desc", key_base)),
            ]),
        );
    }

    Node::container(vec![
        Node::text("swiss_modal.greeting"),
        Node::text("swiss_modal.welcome"),
        Node::text("swiss_modal.language_prompt"),
        Node::text("swiss_modal.language_prompt_multi"),
        Node::container(options),
        Node::text("swiss_modal.choose_later"),
    ])
}

fn swiss_option_key(language: Language) -> &'static str {
    match language.code() {
        "ch" => "swiss_german",
        "fr" => "french",
        "en" => "english",
        _ => "german",
    }
}

fn navigation() -> Node {
    let mut switcher = vec![Node::current_language_display()];
    switcher.extend(Language::all().iter().map(|l| Node::language_option(l.code())));

    Node::container(vec![
        Node::static_text("Blacklodge"),
        Node::text("navigation.home"),
        Node::text("navigation.services"),
        Node::text("navigation.catalog"),
        Node::text("navigation.social"),
        Node::text("navigation.contact"),
        Node::container(switcher),
    ])
}

fn hero() -> Node {
    Node::container(vec![
        Node::static_text("Blacklodge"),
        Node::text("hero.description"),
        Node::text("hero.cta_primary"),
        Node::text("hero.cta_secondary"),
    ])
}

fn services() -> Node {
    Node::container(vec![
        Node::text("services.title"),
        Node::text("services.subtitle"),
        service_card("cocktail"),
        service_card("booth"),
        service_card("entertainment"),
    ])
}

fn service_card(kind: &str) -> Node {
    Node::container(vec![
        Node::text(&format!("services.{}.title", kind)),
        Node::text(&format!("services.{}.description", kind)),
    ])
}

fn catalog() -> Node {
    Node::container(vec![
        Node::text("catalog.title"),
        Node::text("catalog.description"),
        Node::text("catalog.download"),
    ])
}

fn social() -> Node {
    Node::container(vec![
        Node::text("instagram.empty"),
        Node::text("instagram.error"),
        Node::text("instagram.retry"),
    ])
}

fn footer() -> Node {
    Node::container(vec![
        Node::text("footer.description"),
        Node::text("footer.navigation_title"),
        Node::text("footer.legal_title"),
        Node::text("footer.imprint"),
        Node::text("footer.privacy"),
        Node::text("footer.copyright"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_page_has_all_sections() {
        let doc = home();
        for key in [
            "navigation.home",
            "hero.cta_primary",
            "services.cocktail.title",
            "services.entertainment.description",
            "catalog.download",
            "footer.copyright",
        ] {
            assert!(
                doc.body.find_by_key(key).is_some(),
                "home page missing {}",
                key
            );
        }
    }

    #[test]
    fn test_home_page_has_language_switcher() {
        let doc = home();
        let options = doc.body.count(&|n| n.language_option.is_some());
        assert_eq!(options, 4);
        assert_eq!(doc.body.count(&|n| n.shows_current_language), 1);
    }

    #[test]
    fn test_contact_page_form_roles() {
        use crate::dom::NodeRole;
        let doc = contact();
        assert_eq!(doc.url.path(), "/kontakt");
        assert_eq!(
            doc.body.count(&|n| n.role == NodeRole::TextInput), 4);
        assert_eq!(doc.body.count(&|n| n.role == NodeRole::SubmitControl), 1);
        assert_eq!(doc.body.count(&|n| n.role == NodeRole::Tooltip), 1);
    }

    #[test]
    fn test_swiss_prompt_offers_every_language() {
        let prompt = swiss_prompt();
        for code in ["de", "en", "fr", "ch"] {
            assert_eq!(
                prompt.count(&|n| n.language_option.as_deref() == Some(code)),
                1,
                "missing option for {}",
                code
            );
        }
        assert!(prompt.find_by_key("swiss_modal.greeting").is_some());
        assert!(prompt.find_by_key("swiss_modal.choose_later").is_some());
    }
}
