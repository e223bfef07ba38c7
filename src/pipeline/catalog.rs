//! # 采集目录
//!
//! 每种数据源类型固定的采集集合、字段与调度周期。新增报表类型只需在此追加条目。

use serde::{Serialize, Serializer};

/// 字段选择：Facebook 接收字段数组，Google Ads 接收逗号分隔的字段串
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSelection {
    List(&'static [&'static str]),
    Joined(&'static [&'static str]),
}

impl Serialize for FieldSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::List(fields) => fields.serialize(serializer),
            Self::Joined(fields) => serializer.serialize_str(&fields.join(", ")),
        }
    }
}

/// 采集参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionParameters {
    pub fields: FieldSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<&'static str>,
}

/// 单个采集集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<&'static str>,
    pub schedule: &'static str,
    pub parameters: CollectionParameters,
}

pub const FACEBOOK_SOURCE_TYPE: &str = "facebook_marketing";
pub const GOOGLE_ADS_SOURCE_TYPE: &str = "google_ads";

/// Google Ads 数据源整体调度
pub const GOOGLE_ADS_SCHEDULE: &str = "*/60 * * * *";

const GOOGLE_ADS_START_DATE: &str = "2021-01-01";

const FACEBOOK_AD_FIELDS: &[&str] = &[
    "bid_amount",
    "adlabels",
    "creative",
    "status",
    "created_time",
    "updated_time",
    "targeting",
    "effective_status",
    "campaign_id",
    "adset_id",
    "conversion_specs",
    "recommendations",
    "id",
    "bid_info",
    "tracking_specs",
    "bid_type",
    "name",
    "account_id",
    "source_ad_id",
];

const fn facebook(
    name: &'static str,
    kind: &'static str,
    level: &'static str,
    schedule: &'static str,
) -> CollectionSpec {
    CollectionSpec {
        name,
        kind,
        level: Some(level),
        table_name: None,
        schedule,
        parameters: CollectionParameters {
            fields: FieldSelection::List(FACEBOOK_AD_FIELDS),
            start_date: None,
        },
    }
}

/// Facebook Marketing 采集集合
pub const FACEBOOK_COLLECTIONS: &[CollectionSpec] = &[
    facebook("ads", "ads", "ad", "*/20 * * * *"),
    facebook("adset", "ads", "adset", "*/20 * * * *"),
    facebook("campaign", "ads", "campaign", "*/30 * * * *"),
    facebook("account", "account", "account", "*/60 * * * *"),
];

const ACCESSIBLE_BIDDING_STRATEGY_FIELDS: &[&str] = &[
    "accessible_bidding_strategy.id",
    "accessible_bidding_strategy.maximize_conversion_value.target_roas",
    "accessible_bidding_strategy.maximize_conversions.target_cpa",
    "accessible_bidding_strategy.name",
    "accessible_bidding_strategy.owner_customer_id",
    "accessible_bidding_strategy.owner_descriptive_name",
    "accessible_bidding_strategy.resource_name",
    "accessible_bidding_strategy.target_cpa.target_cpa_micros",
    "accessible_bidding_strategy.target_impression_share.cpc_bid_ceiling_micros",
    "accessible_bidding_strategy.target_impression_share.location",
    "accessible_bidding_strategy.target_impression_share.location_fraction_micros",
    "accessible_bidding_strategy.target_roas.target_roas",
    "accessible_bidding_strategy.target_spend.cpc_bid_ceiling_micros",
    "accessible_bidding_strategy.target_spend.target_spend_micros",
    "accessible_bidding_strategy.type",
];

const ACCOUNT_BUDGET_FIELDS: &[&str] = &[
    "account_budget.adjusted_spending_limit_micros",
    "account_budget.adjusted_spending_limit_type",
    "account_budget.amount_served_micros",
    "account_budget.approved_end_date_time",
    "account_budget.approved_end_time_type",
    "account_budget.approved_spending_limit_micros",
    "account_budget.approved_spending_limit_type",
    "account_budget.approved_start_date_time",
    "account_budget.billing_setup",
    "account_budget.id",
    "account_budget.name",
    "account_budget.notes",
    "account_budget.pending_proposal.account_budget_proposal",
    "account_budget.pending_proposal.creation_date_time",
    "account_budget.pending_proposal.end_date_time",
    "account_budget.pending_proposal.end_time_type",
    "account_budget.pending_proposal.name",
    "account_budget.pending_proposal.notes",
    "account_budget.pending_proposal.proposal_type",
    "account_budget.pending_proposal.purchase_order_number",
    "account_budget.pending_proposal.spending_limit_micros",
    "account_budget.pending_proposal.spending_limit_type",
    "account_budget.pending_proposal.start_date_time",
    "account_budget.proposed_end_date_time",
    "account_budget.proposed_end_time_type",
    "account_budget.proposed_spending_limit_micros",
    "account_budget.proposed_spending_limit_type",
    "account_budget.proposed_start_date_time",
    "account_budget.purchase_order_number",
    "account_budget.resource_name",
    "account_budget.status",
    "account_budget.total_adjustments_micros",
];

const ACCOUNT_BUDGET_PROPOSAL_FIELDS: &[&str] = &[
    "account_budget_proposal.account_budget",
    "account_budget_proposal.approval_date_time",
    "account_budget_proposal.approved_end_date_time",
    "account_budget_proposal.approved_end_time_type",
    "account_budget_proposal.approved_spending_limit_micros",
    "account_budget_proposal.approved_spending_limit_type",
    "account_budget_proposal.approved_start_date_time",
    "account_budget_proposal.billing_setup",
    "account_budget_proposal.creation_date_time",
    "account_budget_proposal.id",
    "account_budget_proposal.proposal_type",
    "account_budget_proposal.proposed_end_date_time",
    "account_budget_proposal.proposed_end_time_type",
    "account_budget_proposal.proposed_name",
    "account_budget_proposal.proposed_notes",
    "account_budget_proposal.proposed_purchase_order_number",
    "account_budget_proposal.proposed_spending_limit_micros",
    "account_budget_proposal.proposed_spending_limit_type",
    "account_budget_proposal.proposed_start_date_time",
    "account_budget_proposal.resource_name",
    "account_budget_proposal.status",
];

const fn google_ads(
    name: &'static str,
    table_name: &'static str,
    fields: &'static [&'static str],
) -> CollectionSpec {
    CollectionSpec {
        name,
        kind: name,
        level: None,
        table_name: Some(table_name),
        schedule: GOOGLE_ADS_SCHEDULE,
        parameters: CollectionParameters {
            fields: FieldSelection::Joined(fields),
            start_date: Some(GOOGLE_ADS_START_DATE),
        },
    }
}

/// Google Ads 报表采集集合
pub const GOOGLE_ADS_COLLECTIONS: &[CollectionSpec] = &[
    google_ads(
        "accessible_bidding_strategy",
        "gads_accessible_bidding_strategy",
        ACCESSIBLE_BIDDING_STRATEGY_FIELDS,
    ),
    google_ads(
        "account_budget",
        "gads_account_budget",
        ACCOUNT_BUDGET_FIELDS,
    ),
    google_ads(
        "account_budget_proposal",
        "gads_account_budget_proposal",
        ACCOUNT_BUDGET_PROPOSAL_FIELDS,
    ),
];
