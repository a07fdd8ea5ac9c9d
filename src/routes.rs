use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Bills,
    NewBill,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Switches the user to another view.
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Remembers every navigation, for asserting on flow behavior.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<Route>,
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: Route) {
        self.visited.push(route);
    }
}
