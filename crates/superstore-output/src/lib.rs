#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/superstore-analytics/superstore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod currency;
pub mod export;
pub mod report;

pub use currency::{format_currency, format_whole_dollars};
pub use export::{
    BatchRow, ExportError, ExportFormat, Exporter, LabelledOrder, ORDER_CSV_HEADER,
    read_orders_csv, read_orders_file,
};
pub use report::{PredictionReport, ReportFormat};
