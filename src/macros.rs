/// Accessor fn for one field of [`Globals`](crate::global_state::Globals).
///
/// `global_signal!(now_ms, now_ms: u64);` expands to `fn now_ms() -> RwSignal<u64>`.
#[macro_export]
macro_rules! global_signal {
    ($(#[$meta:meta])* $vis:vis $name:ident, $field:ident : $ty:ty) => {
        $(#[$meta])*
        $vis fn $name() -> ::leptos::RwSignal<$ty> {
            $crate::global_state::globals().$field
        }
    };
}

/// Several [`global_signal!`] accessors in one block:
///
/// ```ignore
/// global_signals! {
///     pub dashboard_state => dashboard: DashboardState,
///     tooltip => tooltip: Option<TooltipData>,
/// }
/// ```
#[macro_export]
macro_rules! global_signals {
    ( $( $(#[$meta:meta])* $vis:vis $name:ident => $field:ident : $ty:ty ),+ $(,)? ) => {
        $(
            $crate::global_signal!($(#[$meta])* $vis $name, $field: $ty);
        )+
    };
}
