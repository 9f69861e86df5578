//! UI preferences and role-derived views.
//!
//! Preferences are plain configuration: a locale, a page size for listings
//! and the weekday calendars start on. Setters do not validate against the
//! option lists; callers pick from [`Preferences::paging_options`],
//! [`Preferences::locales`] and [`Preferences::weekdays`].
//!
//! The derived views (`is_privileged`, `is_admin`, `available_role_options`)
//! read the session passed in and never fail: without a signed-in user they
//! report `false` or an empty list.

use crate::session::Session;
use crate::types::Role;
use serde::{Deserialize, Serialize};

/// Page sizes offered for listings
pub const PAGING_OPTIONS: [usize; 4] = [5, 10, 15, 50];

/// Locales offered in the locale picker, as `(value, text)`
pub const LOCALES: [(&str, &str); 1] = [("en-US", "English US (en-US)")];

/// Calendar start days offered, as `(value, text)` with Sunday = 0
pub const WEEKDAYS: [(u8, &str); 3] = [(0, "Sunday"), (1, "Monday"), (6, "Saturday")];

/// A role entry for a role picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleOption {
    pub value: Role,
    pub text: &'static str,
}

impl From<Role> for RoleOption {
    fn from(role: Role) -> Self {
        Self {
            value: role,
            text: role.label(),
        }
    }
}

/// Localized labels for a date picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarLabels {
    pub prev_decade: &'static str,
    pub prev_year: &'static str,
    pub prev_month: &'static str,
    pub current_month: &'static str,
    pub next_month: &'static str,
    pub next_year: &'static str,
    pub next_decade: &'static str,
    pub today: &'static str,
    pub selected: &'static str,
    pub no_date_selected: &'static str,
    pub calendar: &'static str,
    pub nav: &'static str,
    pub help: &'static str,
}

const LABELS_DE: CalendarLabels = CalendarLabels {
    prev_decade: "Vorheriges Jahrzehnt",
    prev_year: "Vorheriges Jahr",
    prev_month: "Vorheriger Monat",
    current_month: "Aktueller Monat",
    next_month: "Nächster Monat",
    next_year: "Nächstes Jahr",
    next_decade: "Nächstes Jahrzehnt",
    today: "Heute",
    selected: "Ausgewähltes Datum",
    no_date_selected: "Kein Datum gewählt",
    calendar: "Kalender",
    nav: "Kalendernavigation",
    help: "Mit den Pfeiltasten durch den Kalender navigieren",
};

const LABELS_AR_EG: CalendarLabels = CalendarLabels {
    prev_decade: "العقد السابق",
    prev_year: "العام السابق",
    prev_month: "الشهر السابق",
    current_month: "الشهر الحالي",
    next_month: "الشهر المقبل",
    next_year: "العام المقبل",
    next_decade: "العقد القادم",
    today: "اليوم",
    selected: "التاريخ المحدد",
    no_date_selected: "لم يتم اختيار تاريخ",
    calendar: "التقويم",
    nav: "الملاحة التقويم",
    help: "استخدم مفاتيح المؤشر للتنقل في التواريخ",
};

const LABELS_ZH: CalendarLabels = CalendarLabels {
    prev_decade: "过去十年",
    prev_year: "上一年",
    prev_month: "上个月",
    current_month: "当前月份",
    next_month: "下个月",
    next_year: "明年",
    next_decade: "下一个十年",
    today: "今天",
    selected: "选定日期",
    no_date_selected: "未选择日期",
    calendar: "日历",
    nav: "日历导航",
    help: "使用光标键浏览日期",
};

/// UI preference state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    locale: String,
    weekday: u8,
    rows_per_page: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            weekday: 1,
            rows_per_page: 5,
        }
    }
}

impl Preferences {
    pub fn new(locale: impl Into<String>, weekday: u8, rows_per_page: usize) -> Self {
        Self {
            locale: locale.into(),
            weekday,
            rows_per_page,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn weekday(&self) -> u8 {
        self.weekday
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn set_start_weekday(&mut self, weekday: u8) {
        self.weekday = weekday;
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page;
    }

    pub fn paging_options(&self) -> &'static [usize] {
        &PAGING_OPTIONS
    }

    pub fn locales(&self) -> &'static [(&'static str, &'static str)] {
        &LOCALES
    }

    pub fn weekdays(&self) -> &'static [(u8, &'static str)] {
        &WEEKDAYS
    }

    /// Date picker labels for a locale, when a translation exists
    pub fn calendar_labels(&self, locale: &str) -> Option<&'static CalendarLabels> {
        match locale {
            "de" => Some(&LABELS_DE),
            "ar-EG" => Some(&LABELS_AR_EG),
            "zh" => Some(&LABELS_ZH),
            _ => None,
        }
    }

    /// Labels for the active locale
    pub fn active_calendar_labels(&self) -> Option<&'static CalendarLabels> {
        self.calendar_labels(&self.locale)
    }

    /// Whether the signed-in user is a manager or an admin
    pub fn is_privileged(&self, session: &Session) -> bool {
        session.role().is_some_and(Role::is_privileged)
    }

    /// Whether the signed-in user is an admin
    pub fn is_admin(&self, session: &Session) -> bool {
        session.role() == Some(Role::Admin)
    }

    /// Roles the signed-in user may assign to other accounts
    pub fn available_role_options(&self, session: &Session) -> Vec<RoleOption> {
        session
            .role()
            .map(|role| role.assignable().iter().copied().map(RoleOption::from).collect())
            .unwrap_or_default()
    }

    /// Slice out one page of `items` using the configured page size.
    ///
    /// Pages are 1-based; page 0 is treated as page 1 and a page past the
    /// end is empty. A page size of zero shows everything on one page.
    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        if self.rows_per_page == 0 {
            return items;
        }
        let start = page.saturating_sub(1).saturating_mul(self.rows_per_page);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.rows_per_page).min(items.len());
        &items[start..end]
    }

    /// Number of pages needed for `total` items
    pub fn page_count(&self, total: usize) -> usize {
        if self.rows_per_page == 0 {
            return usize::from(total > 0);
        }
        total.div_ceil(self.rows_per_page)
    }
}
