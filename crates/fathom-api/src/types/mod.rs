pub mod base;
pub mod entities;
pub mod params;

pub use base::{ApiVersion, Identified, ListResponse, PaginationParams};
pub use entities::{
    Account, AggregationRow, ContentEntry, CurrentVisitorsResponse, DeletedEvent, DeletedSite,
    Event, ReferrerEntry, Sharing, Site, WipedEvent, WipedSite, parse_timestamp,
};
pub use params::{
    AggregationEntity, AggregationFilter, AggregationParams, CreateEventParams, CreateSiteParams,
    CurrentVisitorsParams, DateGrouping, FilterOperator, ReportOptions, UpdateEventParams,
    UpdateSiteParams,
};
