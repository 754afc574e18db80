use std::{cell::RefCell, rc::Rc};

use citywx_core::Session;
use inquire::{
    CustomUserError,
    autocompletion::{Autocomplete, Replacement},
};

/// Re-runs the query on every edit of the prompt input and lists the matching
/// city names as suggestions.
///
/// Suggestions are bare city names, so accepting one submits a query that
/// finds that city. Status messages are never offered as suggestions.
#[derive(Clone)]
pub struct LiveMatches {
    session: Rc<RefCell<Session>>,
}

impl LiveMatches {
    pub fn new(session: Rc<RefCell<Session>>) -> Self {
        Self { session }
    }
}

impl Autocomplete for LiveMatches {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let mut session = self.session.borrow_mut();
        let state = session.query_changed(input);

        Ok(state.results.iter().map(|record| record.city.clone()).collect())
    }

    fn get_completion(
        &mut self,
        input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        // Tab fills in the highlighted city; without one the input stays as typed.
        Ok(highlighted_suggestion.filter(|city| city != input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citywx_core::{MatchMode, QueryStatus, WeatherCatalog};

    fn session() -> Rc<RefCell<Session>> {
        let catalog = WeatherCatalog::from_json(
            r#"{"weather_data": [
                { "city": "Porto", "country": "Portugal", "temperature": 17, "condition": "Windy", "icon": "💨" },
                { "city": "Porto Alegre", "country": "Brazil", "temperature": 26, "condition": "Humid", "icon": "🌤️" }
            ]}"#,
        )
        .unwrap()
        .catalog;
        Rc::new(RefCell::new(Session::with_catalog(catalog, MatchMode::Substring)))
    }

    #[test]
    fn suggestions_follow_each_keystroke() {
        let session = session();
        let mut live = LiveMatches::new(Rc::clone(&session));

        assert_eq!(live.get_suggestions("port").unwrap(), ["Porto", "Porto Alegre"]);
        assert_eq!(live.get_suggestions("porto a").unwrap(), ["Porto Alegre"]);
        assert!(live.get_suggestions("").unwrap().is_empty());

        assert_eq!(session.borrow().state().query, "");
    }

    #[test]
    fn no_match_offers_no_suggestions() {
        let session = session();
        let mut live = LiveMatches::new(Rc::clone(&session));

        assert!(live.get_suggestions("porto x").unwrap().is_empty());
        assert_eq!(session.borrow().state().status, QueryStatus::NoMatch);
    }

    #[test]
    fn completion_fills_highlighted_city() {
        let mut live = LiveMatches::new(session());

        let replacement = live.get_completion("por", Some("Porto".into())).unwrap();
        assert_eq!(replacement.as_deref(), Some("Porto"));

        assert_eq!(live.get_completion("por", None).unwrap(), None);
    }
}
