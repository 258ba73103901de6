/// Application name
pub const APP_NAME: &str = "Stavba VZT";

/// Storage key: registered users
pub const KEY_USERS: &str = "users";
/// Storage key: construction projects
pub const KEY_PROJECTS: &str = "projects";
/// Storage key: site photos
pub const KEY_PHOTOS: &str = "photos";
/// Storage key: site reports
pub const KEY_REPORTS: &str = "reports";
/// Storage key: chat messages of every channel
pub const KEY_CHAT_MESSAGES: &str = "chat_messages";
/// Storage key: attendance (check-in / check-out) entries
pub const KEY_ATTENDANCE: &str = "attendance";
/// Storage key: audit log
pub const KEY_AUDIT_LOG: &str = "audit_log";
/// Storage key: UI theme
pub const KEY_THEME: &str = "theme";
/// Storage key: logged-in user
pub const KEY_CURRENT_USER: &str = "current_user";

/// Keys given a default value on first run, in seeding order.  The session
/// key is never seeded.
pub const SEEDED_KEYS: [&str; 8] = [
    KEY_USERS,
    KEY_PROJECTS,
    KEY_PHOTOS,
    KEY_REPORTS,
    KEY_CHAT_MESSAGES,
    KEY_ATTENDANCE,
    KEY_AUDIT_LOG,
    KEY_THEME,
];

/// Maximum number of audit log entries kept (oldest evicted first)
pub const AUDIT_LOG_CAPACITY: usize = 100;

/// Chat channel used when the caller passes none
pub const DEFAULT_CHANNEL: &str = "general";

/// Audit attribution when no user is logged in
pub const SYSTEM_ACTOR: &str = "System";

/// Display format of chat / audit timestamps (cs-CZ `toLocaleString`)
pub const LOCALE_TIMESTAMP_FORMAT: &str = "%-d. %-m. %Y %-H:%M:%S";

/// Window used for the "reports this week" dashboard figure, in days
pub const REPORT_WINDOW_DAYS: i64 = 7;

/// Seconds per hour, for m³/h → m³/s conversion
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Equivalent straight length added per duct bend (m)
pub const BEND_EQUIVALENT_LENGTH_M: f64 = 1.5;

/// Equivalent straight length added per duct branch (m)
pub const BRANCH_EQUIVALENT_LENGTH_M: f64 = 2.0;

/// Darcy friction factor used by the pressure loss estimate
pub const FRICTION_FACTOR: f64 = 0.02;

/// Air density at room conditions (kg/m³)
pub const AIR_DENSITY_KG_M3: f64 = 1.2;
