//! Path based navigation between views.

use std::{fmt, str::FromStr};

use crate::{
    error::RouteError,
    gfx::rendering::RenderBackend,
    views::{DemoView, GameView, HomeView, PrimeView, View},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Demo,
    Game,
    Prime,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Demo, Route::Game, Route::Prime];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/home",
            Route::Demo => "/demo",
            Route::Game => "/game",
            Route::Prime => "/prime",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Demo => "Demo",
            Route::Game => "Game",
            Route::Prime => "Prime",
        }
    }

    /// Resolves a path to a route. `/` redirects to `/home`.
    pub fn resolve(path: &str) -> Result<Route, RouteError> {
        let path = path.trim();
        if path == "/" || path.is_empty() {
            return Ok(Route::Home);
        }
        let path = path.trim_end_matches('/');
        Route::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .ok_or_else(|| RouteError::UnknownRoute(path.to_string()))
    }

    /// Builds the view behind this route.
    pub fn load<B: RenderBackend>(self) -> Box<dyn View<B>> {
        log::info!("Loading route {}", self.path());
        match self {
            Route::Home => Box::new(HomeView::new()),
            Route::Demo => Box::new(DemoView::new()),
            Route::Game => Box::new(GameView::new()),
            Route::Prime => Box::new(PrimeView::new()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::resolve(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::rendering::HeadlessBackend;

    #[test]
    fn test_root_redirects_home() {
        assert_eq!(Route::resolve("/"), Ok(Route::Home));
    }

    #[test]
    fn test_resolve_all_paths() {
        for route in Route::ALL {
            assert_eq!(Route::resolve(route.path()), Ok(route));
            assert_eq!(route.path().parse::<Route>(), Ok(route));
        }
        assert_eq!(Route::resolve("/game/"), Ok(Route::Game));
    }

    #[test]
    fn test_unknown_route() {
        assert_eq!(
            Route::resolve("/settings"),
            Err(RouteError::UnknownRoute("/settings".to_string()))
        );
        assert!(Route::resolve("home").is_err());
    }

    #[test]
    fn test_load_matches_name() {
        for route in Route::ALL {
            let view = route.load::<HeadlessBackend>();
            assert_eq!(view.title(), route.name());
        }
    }
}
