//! Shared types used by the renderers, the generator and the CLI output.

/// A top-level page of the site.
///
/// The route list is fixed: it drives the header navigation, the footer
/// "Navigate" list and the files the generator writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Portfolio,
    Process,
    Art,
    Contact,
}

impl Route {
    /// Every route in navigation order.
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Portfolio,
        Route::Process,
        Route::Art,
        Route::Contact,
    ];

    /// URL path, as linked from navigation.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Portfolio => "/portfolio",
            Route::Process => "/process",
            Route::Art => "/art",
            Route::Contact => "/contact",
        }
    }

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Homepage",
            Route::Portfolio => "Portfolio",
            Route::Process => "Our process",
            Route::Art => "Art",
            Route::Contact => "Contact us",
        }
    }

    /// Content document backing the page.
    pub fn document(self) -> &'static str {
        match self {
            Route::Home => "home.json",
            Route::Portfolio => "portfolio.json",
            Route::Process => "process.json",
            Route::Art => "art.json",
            Route::Contact => "contact.json",
        }
    }

    /// Output file relative to the output root.
    pub fn output_file(self) -> &'static str {
        match self {
            Route::Home => "index.html",
            Route::Portfolio => "portfolio/index.html",
            Route::Process => "process/index.html",
            Route::Art => "art/index.html",
            Route::Contact => "contact/index.html",
        }
    }
}
