pub mod dashboard_consts {
    //! Dashboard Configuration Constants
    //!
    //! Dataset keys, metric labels and date formatting shared by the loader,
    //! the presenter and the terminal UI.

    // =============================================================================
    // DATASETS
    // =============================================================================

    pub const ATENDIMENTOS: &str = "atendimentos";
    pub const FEEDBACKS: &str = "feedbacks";
    pub const MAPEAMENTOS: &str = "mapeamentos";
    pub const REUNIOES: &str = "reunioes";

    /// Datasets read by the dashboard, in configuration order.
    pub const DASHBOARD_DATASETS: [&str; 4] = [ATENDIMENTOS, FEEDBACKS, MAPEAMENTOS, REUNIOES];

    /// Metric cards in display order: (dataset key, label).
    pub const METRIC_LABELS: [(&str, &str); 4] = [
        (REUNIOES, "Reuniões"),
        (FEEDBACKS, "Feedbacks"),
        (ATENDIMENTOS, "Atendimentos"),
        (MAPEAMENTOS, "Mapeamentos"),
    ];

    /// Column holding the per-row date.
    pub const DEFAULT_DATE_COLUMN: &str = "Data";

    /// Directory the dashboard reads snapshots from by default.
    pub const DEFAULT_DATA_DIR: &str = "data";

    // =============================================================================
    // DATES
    // =============================================================================

    /// Day/month/year format used for parsing and display.
    pub const DATE_FORMAT: &str = "%d/%m/%Y";

    /// Picker step sizes, in days.
    pub mod picker {
        pub const DAY: i64 = 1;
        pub const WEEK: i64 = 7;
        pub const PAGE: i64 = 30;
    }

    /// Maximum number of loader notices kept on screen.
    pub const MAX_NOTICES: usize = 20;
}

pub mod export_consts {
    //! Exporter Configuration Constants

    /// Spreadsheet exported when no URL is configured.
    pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1Tbze4MTLIq8F-jrSpWr3yPtjUo9KUaTcj9FnjFHuTvA/edit?gid=2122327024#gid=2122327024";

    /// Default tab index → output name table.
    pub const DEFAULT_TABS: [(usize, &str); 5] = [
        (0, "dados-atendimentos"),
        (1, "dados-mapeamentos"),
        (2, "dados-reunioes"),
        (3, "dados-feedbacks"),
        (4, "status-clientes"),
    ];

    /// Snapshot file extension.
    pub const SNAPSHOT_EXTENSION: &str = "parquet";

    /// Sheets REST endpoint.
    pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

    /// Read-only access is all the exporter needs.
    pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

    /// Redirect used by the installed-app consent flow. The user pastes the
    /// resulting URL (or just its `code` parameter) back into the terminal.
    pub const OAUTH_REDIRECT_URI: &str = "http://localhost";

    pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
    pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

    /// Environment variable holding a ready-made bearer token.
    pub const ACCESS_TOKEN_ENV: &str = "SHEETS_ACCESS_TOKEN";

    /// Request timeouts, in seconds.
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}
