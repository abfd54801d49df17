//! Integration tests for the gallery controller.

use arxiu::gallery::{Card, FilterButton, Panel, EMPTY_MESSAGE, LOAD_ERROR_MESSAGE};
use arxiu::{Action, GalleryController, GalleryIndex, RenderPort};

const INDEX: &str = r#"{
  "files": [
    {"id": "a1", "filename": "first_zine.pdf", "author": "Ana",
     "hashtags": ["zines", "art"], "is_18_plus": false,
     "upload_date": "2024-03-01T12:00:00.000Z"},
    {"id": "b2", "filename": "late_night.pdf", "author": null,
     "hashtags": ["poetry"], "is_18_plus": true,
     "upload_date": "2024-03-02T12:00:00.000Z"},
    {"id": "c3", "filename": "poems.pdf",
     "hashtags": ["poetry", "zines"], "is_18_plus": false,
     "upload_date": "2024-03-03T12:00:00.000Z"}
  ],
  "hashtags": ["art", "poetry", "zines"]
}"#;

#[derive(Default)]
struct Screen {
    cards: Vec<Card>,
    filters: Vec<FilterButton>,
    message: Option<String>,
    status: String,
    panels: Vec<Panel>,
    renders: usize,
}

impl RenderPort for Screen {
    fn render_list(&mut self, cards: &[Card], message: Option<&str>) {
        self.cards = cards.to_vec();
        self.message = message.map(str::to_string);
        self.renders += 1;
    }

    fn render_filters(&mut self, filters: &[FilterButton]) {
        self.filters = filters.to_vec();
    }

    fn show_panel(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    fn hide_panel(&mut self, panel: Panel) {
        self.panels.retain(|p| *p != panel);
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

fn labels(screen: &Screen) -> Vec<&str> {
    screen.cards.iter().map(|c| c.label.as_str()).collect()
}

fn loaded() -> GalleryController<Screen> {
    let mut controller = GalleryController::new(Screen::default());
    controller.load(GalleryIndex::from_json(INDEX).unwrap());
    controller
}

#[test]
fn test_initial_load() {
    let controller = loaded();
    let screen = controller.port();

    assert_eq!(labels(screen), vec!["first_zine", "poems"]);
    assert_eq!(screen.status, "2 files");
    assert!(screen.message.is_none());

    let filters: Vec<_> = screen.filters.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(filters, vec!["all", "#art", "#poetry", "#zines"]);
    assert!(screen.filters[0].active);

    let card = &screen.cards[0];
    assert_eq!(card.href, "data/first_zine.pdf");
    assert_eq!(card.author.as_deref(), Some("Ana"));
    assert_eq!(card.tags, vec!["#zines", "#art"]);
}

#[test]
fn test_filter_and_adult_mode() {
    let mut controller = loaded();

    controller.dispatch(Action::SelectTag(Some("poetry".into())));
    assert_eq!(labels(controller.port()), vec!["poems"]);
    assert!(controller.port().filters[2].active);

    controller.dispatch(Action::ToggleAdultMode);
    assert_eq!(controller.port().panels, vec![Panel::AgeVeil]);
    assert_eq!(labels(controller.port()), vec!["poems"]);

    controller.dispatch(Action::ConfirmAge);
    assert!(controller.port().panels.is_empty());
    assert_eq!(labels(controller.port()), vec!["late_night", "poems"]);
    assert_eq!(controller.port().status, "2 files");

    controller.dispatch(Action::SelectTag(Some("art".into())));
    assert_eq!(labels(controller.port()), vec!["first_zine"]);
    assert_eq!(controller.port().status, "1 file");
}

#[test]
fn test_filter_with_no_matches() {
    let mut controller = loaded();
    controller.dispatch(Action::SelectTag(Some("missing".into())));
    assert!(controller.port().cards.is_empty());
    assert_eq!(controller.port().message.as_deref(), Some(EMPTY_MESSAGE));
    assert_eq!(controller.port().status, "0 files");
}

#[test]
fn test_panel_actions_do_not_rerender_list() {
    let mut controller = loaded();
    let before = controller.port().renders;

    controller.dispatch(Action::OpenUpload);
    assert_eq!(controller.port().panels, vec![Panel::Upload]);
    controller.dispatch(Action::Escape);
    assert!(controller.port().panels.is_empty());

    assert_eq!(controller.port().renders, before);
}

#[test]
fn test_load_failure() {
    let mut controller = GalleryController::new(Screen::default());
    controller.dispatch(Action::LoadFailed("HTTP 503".into()));
    assert_eq!(controller.port().message.as_deref(), Some(LOAD_ERROR_MESSAGE));

    controller.load(GalleryIndex::from_json(INDEX).unwrap());
    assert!(controller.port().message.is_none());
    assert_eq!(controller.port().cards.len(), 2);
}
