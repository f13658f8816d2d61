pub mod chart;
pub mod flash_card;
pub mod menu;
pub mod practice_view;
pub mod reference_chart;
pub mod stats_dashboard;
pub mod timing_bar;
