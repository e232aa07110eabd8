//! Role-aware navigation shell.
//!
//! Exactly one menu variant is shown per resolved role. Nothing is shown
//! while role resolution is still loading, so the wrong menu never flashes.

use crate::roles::Role;
use crate::session::SessionResolver;
use crate::types::DbId;

pub const ROUTE_HOME: &str = "/";
pub const ROUTE_LOGIN: &str = "/login";
pub const ROUTE_SIGNUP: &str = "/signup";
pub const ROUTE_STUDENT_DASHBOARD: &str = "/student-dashboard";
pub const ROUTE_COURSE_ENROLLMENT: &str = "/course-enrollment";
pub const ROUTE_STUDENT_PROFILE: &str = "/student-profile";
pub const ROUTE_TEACHER_DASHBOARD: &str = "/teacher-dashboard";
pub const ROUTE_CREATE_COURSE: &str = "/create-course";
pub const ROUTE_TEACHER_PROFILE: &str = "/teacher-profile";
pub const ROUTE_COURSE_CHAT: &str = "/course-chat";

/// A named route in a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: &'static str,
}

const PUBLIC_LINKS: &[NavLink] = &[
    NavLink { label: "Home", route: ROUTE_HOME },
    NavLink { label: "Login", route: ROUTE_LOGIN },
    NavLink { label: "Sign Up", route: ROUTE_SIGNUP },
];

const STUDENT_LINKS: &[NavLink] = &[
    NavLink { label: "Home", route: ROUTE_HOME },
    NavLink { label: "Dashboard", route: ROUTE_STUDENT_DASHBOARD },
    NavLink { label: "Join a Course", route: ROUTE_COURSE_ENROLLMENT },
    NavLink { label: "Profile", route: ROUTE_STUDENT_PROFILE },
];

const TEACHER_LINKS: &[NavLink] = &[
    NavLink { label: "Home", route: ROUTE_HOME },
    NavLink { label: "Dashboard", route: ROUTE_TEACHER_DASHBOARD },
    NavLink { label: "Create Course", route: ROUTE_CREATE_COURSE },
    NavLink { label: "Profile", route: ROUTE_TEACHER_PROFILE },
];

/// The three mutually exclusive menu variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMenu {
    Public,
    Student,
    Teacher,
}

impl NavMenu {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Student => NavMenu::Student,
            Role::Teacher => NavMenu::Teacher,
            Role::Anonymous => NavMenu::Public,
        }
    }

    pub fn links(&self) -> &'static [NavLink] {
        match self {
            NavMenu::Public => PUBLIC_LINKS,
            NavMenu::Student => STUDENT_LINKS,
            NavMenu::Teacher => TEACHER_LINKS,
        }
    }

    /// Where the user lands after login.
    pub fn home_route(&self) -> &'static str {
        match self {
            NavMenu::Public => ROUTE_HOME,
            NavMenu::Student => ROUTE_STUDENT_DASHBOARD,
            NavMenu::Teacher => ROUTE_TEACHER_DASHBOARD,
        }
    }

    pub fn contains_route(&self, route: &str) -> bool {
        self.links().iter().any(|l| l.route == route)
    }
}

/// Pick the menu for a resolver; `None` while it is still loading.
pub fn select_menu(resolver: &SessionResolver) -> Option<NavMenu> {
    resolver.role().map(NavMenu::for_role)
}

/// Owned link carrying a course-specific route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseLink {
    pub label: &'static str,
    pub route: String,
}

/// Secondary menu shown on a teacher's course pages.
pub fn course_menu(course_id: DbId) -> Vec<CourseLink> {
    [
        ("Dashboard", "/teacher-course-dashboard"),
        ("Course Logs", "/course-logs"),
        ("Students", "/students-in-course"),
        ("Materials", "/materials-overview"),
    ]
    .into_iter()
    .map(|(label, base)| CourseLink {
        label,
        route: format!("{base}?courseId={course_id}"),
    })
    .collect()
}

/// Route a student follows from a course card into its chat.
pub fn course_chat_route(course_id: DbId) -> String {
    format!("{ROUTE_COURSE_CHAT}?course={course_id}")
}
