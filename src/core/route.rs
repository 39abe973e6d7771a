use crate::error::CliError;
use std::fmt;
use std::str::FromStr;

/// The four pages reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Inventory,
    LegoSets,
    Stats,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Dashboard,
        Route::Inventory,
        Route::LegoSets,
        Route::Stats,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Inventory => "/inventory",
            Route::LegoSets => "/lego-sets",
            Route::Stats => "/stats",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Inventory => "Inventory",
            Route::LegoSets => "LEGO Sets",
            Route::Stats => "Statistics",
        }
    }

    /// Subcommand that opens this page
    pub fn command(&self) -> &'static str {
        match self {
            Route::Dashboard => "brickdash dashboard",
            Route::Inventory => "brickdash inventory",
            Route::LegoSets => "brickdash sets",
            Route::Stats => "brickdash stats",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        Route::ALL
            .into_iter()
            .find(|route| route.path().trim_end_matches('/') == trimmed)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Route {
    type Err = CliError;

    /// Accepts paths (`/lego-sets`) and short names (`sets`, `stats`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        if input.starts_with('/') {
            return Route::from_path(&input).ok_or(CliError::UnknownRoute {
                route: s.to_string(),
            });
        }
        match input.as_str() {
            "dashboard" | "home" => Ok(Route::Dashboard),
            "inventory" | "items" => Ok(Route::Inventory),
            "lego-sets" | "sets" | "lego" => Ok(Route::LegoSets),
            "stats" | "statistics" => Ok(Route::Stats),
            _ => Err(CliError::UnknownRoute {
                route: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/inventory"), Some(Route::Inventory));
        assert_eq!(Route::from_path("/lego-sets/"), Some(Route::LegoSets));
        assert_eq!(Route::from_path("/stats"), Some(Route::Stats));
        assert_eq!(Route::from_path("/images"), None);
    }

    #[test]
    fn test_from_str_names_and_paths() {
        assert_eq!("sets".parse::<Route>().unwrap(), Route::LegoSets);
        assert_eq!("Statistics".parse::<Route>().unwrap(), Route::Stats);
        assert_eq!("/inventory".parse::<Route>().unwrap(), Route::Inventory);
        assert!(matches!(
            "checkout".parse::<Route>(),
            Err(CliError::UnknownRoute { .. })
        ));
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = Route::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["Dashboard", "Inventory", "LEGO Sets", "Statistics"]);
    }
}
