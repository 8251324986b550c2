use crate::app::TooltipData;
use crate::application::DashboardState;
use crate::domain::market_data::NewsArticle;
use leptos::*;
use once_cell::sync::OnceCell;

pub struct Globals {
    pub dashboard: RwSignal<DashboardState>,
    pub auto_refresh: RwSignal<bool>,
    pub now_ms: RwSignal<u64>,
    pub tooltip: RwSignal<Option<TooltipData>>,
    pub news: RwSignal<Vec<NewsArticle>>,
    pub news_index: RwSignal<usize>,
    pub news_error: RwSignal<Option<String>>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        dashboard: create_rw_signal(DashboardState::default()),
        auto_refresh: create_rw_signal(true),
        now_ms: create_rw_signal(0),
        tooltip: create_rw_signal(None),
        news: create_rw_signal(Vec::new()),
        news_index: create_rw_signal(0),
        news_error: create_rw_signal(None),
    })
}
