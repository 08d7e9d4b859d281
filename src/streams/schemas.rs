//! Stream schemas
//!
//! Property lists for each Zoho Books resource, as returned by the list and
//! detail endpoints.

use crate::schema::{
    array, boolean, custom, date, date_time, integer, number, object, properties, string,
    JsonSchema, JsonType,
};

const ARRAY: JsonType = JsonType::Array;
const NUMBER: JsonType = JsonType::Number;
const OBJECT: JsonType = JsonType::Object;
const STRING: JsonType = JsonType::String;

pub fn organization_id() -> JsonSchema {
    properties(vec![("organization_id", string())])
}

pub fn journals_id() -> JsonSchema {
    properties(vec![
        ("journal_id", string()),
        ("journal_date", string()),
        ("entry_number", string()),
        ("reference_number", string()),
        ("currency_id", string()),
        ("status", string()),
        ("notes", string()),
        ("journal_type", string()),
        ("entity_type", string()),
        ("total", number()),
        ("bcy_total", number()),
        ("created_by_id", string()),
        ("created_by_name", string()),
        ("documents", custom(&[ARRAY, STRING])),
    ])
}

pub fn journals() -> JsonSchema {
    properties(vec![
        ("journal_id", string()),
        ("entry_number", string()),
        ("reference_number", string()),
        ("notes", string()),
        ("currency_id", string()),
        ("currency_code", string()),
        ("currency_symbol", string()),
        ("exchange_rate", number()),
        ("journal_date", string()),
        ("journal_type", string()),
        ("vat_treatment", string()),
        ("product_type", string()),
        ("include_in_vat_return", boolean()),
        ("is_bas_adjustment", boolean()),
        (
            "line_items",
            array(object(vec![
                ("line_id", string()),
                ("account_id", string()),
                ("customer_id", string()),
                ("customer_name", string()),
                ("account_name", string()),
                ("description", string()),
                ("debit_or_credit", string()),
                ("tax_exemption_id", string()),
                ("tax_exemption_type", string()),
                ("tax_exemption_code", string()),
                ("tax_authority_id", string()),
                ("tax_authority_name", string()),
                ("tax_id", string()),
                ("tax_name", string()),
                ("tax_type", string()),
                ("tax_percentage", string()),
                ("amount", number()),
                ("bcy_amount", number()),
                ("acquisition_vat_id", string()),
                ("acquisition_vat_name", string()),
                ("acquisition_vat_percentage", string()),
                ("acquisition_vat_amount", string()),
                ("reverse_charge_vat_id", string()),
                ("reverse_charge_vat_name", string()),
                ("reverse_charge_vat_percentage", string()),
                ("reverse_charge_vat_amount", string()),
                (
                    "tags",
                    array(object(vec![
                        ("is_tag_mandatory", boolean()),
                        ("tag_id", string()),
                        ("tag_name", string()),
                        ("tag_option_id", string()),
                        ("tag_option_name", string()),
                    ])),
                ),
                ("project_id", string()),
                ("project_name", string()),
            ])),
        ),
        ("line_item_total", number()),
        ("total", number()),
        ("bcy_total", number()),
        ("price_precision", custom(&[NUMBER, STRING])),
        (
            "taxes",
            array(object(vec![
                ("tax_name", string()),
                ("tax_amount", integer()),
                ("debit_or_credit", string()),
                ("tax_account", boolean()),
            ])),
        ),
        ("created_time", date_time()),
        ("last_modified_time", date_time()),
        ("status", string()),
        ("custom_fields", custom(&[ARRAY, STRING])),
    ])
}

pub fn chart_of_accounts() -> JsonSchema {
    properties(vec![
        ("account_id", string()),
        ("account_name", string()),
        ("account_code", string()),
        ("account_type", string()),
        ("is_user_created", boolean()),
        ("is_system_account", boolean()),
        ("is_standalone_account", boolean()),
        ("is_active", boolean()),
        ("can_show_in_ze", boolean()),
        ("is_involved_in_transaction", boolean()),
        ("current_balance", string()),
        ("parent_account_id", string()),
        ("parent_account_name", string()),
        ("depth", integer()),
        ("has_attachment", boolean()),
        ("is_child_present", boolean()),
        ("child_count", string()),
        ("documents", array(string())),
        ("created_time", date_time()),
        ("last_modified_time", date_time()),
    ])
}

pub fn items() -> JsonSchema {
    properties(vec![
        ("item_id", string()),
        ("vendor_id", string()),
        ("name", string()),
        ("item_name", string()),
        ("unit", string()),
        ("unitkey_code", string()),
        ("status", string()),
        ("source", string()),
        ("is_linked_with_zohocrm", boolean()),
        ("zcrm_product_id", string()),
        ("description", string()),
        ("rate", number()),
        ("tax_id", string()),
        ("tax_name", string()),
        ("tax_percentage", integer()),
        ("purchase_account_id", string()),
        ("purchase_account_name", string()),
        ("account_id", string()),
        ("account_name", string()),
        ("purchase_description", string()),
        ("purchase_rate", number()),
        ("item_type", string()),
        ("product_type", string()),
        ("stock_on_hand", number()),
        ("has_attachment", boolean()),
        ("available_stock", number()),
        ("actual_available_stock", number()),
        ("sku", string()),
        ("image_name", string()),
        ("image_type", string()),
        ("image_document_id", string()),
        ("created_time", date_time()),
        ("last_modified_time", date_time()),
        ("show_in_storefront", boolean()),
        ("item_tax_preferences", custom(&[ARRAY, STRING])),
        ("warehouses", custom(&[ARRAY, STRING])),
    ])
}

pub fn invoices() -> JsonSchema {
    properties(vec![
        ("invoice_id", string()),
        ("ach_payment_initiated", boolean()),
        ("zcrm_potential_id", string()),
        ("zcrm_potential_name", string()),
        ("customer_name", string()),
        ("customer_id", string()),
        ("company_name", string()),
        ("status", string()),
        ("color_code", string()),
        ("current_sub_status_id", string()),
        ("current_sub_status", string()),
        ("invoice_number", string()),
        ("reference_number", string()),
        ("date", string()),
        ("due_date", string()),
        ("due_days", string()),
        ("currency_id", string()),
        ("schedule_time", string()),
        ("email", string()),
        ("currency_code", string()),
        ("currency_symbol", string()),
        ("template_type", string()),
        ("is_viewed_by_client", boolean()),
        ("has_attachment", boolean()),
        ("client_viewed_time", string()),
        ("invoice_url", string()),
        ("project_name", string()),
        (
            "billing_address",
            object(vec![
                ("address", string()),
                ("street2", string()),
                ("city", string()),
                ("state", string()),
                ("zipcode", string()),
                ("country", string()),
                ("phone", string()),
                ("fax", string()),
                ("attention", string()),
            ]),
        ),
        (
            "shipping_address",
            object(vec![
                ("address", string()),
                ("street2", string()),
                ("city", string()),
                ("state", string()),
                ("zipcode", string()),
                ("country", string()),
                ("phone", string()),
                ("fax", string()),
                ("attention", string()),
            ]),
        ),
        ("country", string()),
        ("phone", string()),
        ("created_by", string()),
        ("updated_time", string()),
        ("transaction_type", string()),
        ("total", number()),
        ("balance", number()),
        ("created_time", date_time()),
        ("last_modified_time", date_time()),
        ("is_emailed", boolean()),
        ("is_viewed_in_mail", boolean()),
        ("mail_first_viewed_time", string()),
        ("mail_last_viewed_time", string()),
        ("reminders_sent", integer()),
        ("last_reminder_sent_date", string()),
        ("payment_expected_date", string()),
        ("last_payment_date", string()),
        ("custom_fields", custom(&[ARRAY, STRING])),
        ("custom_field_hash", custom(&[ARRAY, OBJECT])),
        ("template_id", string()),
        ("documents", string()),
        ("salesperson_id", string()),
        ("salesperson_name", string()),
        ("shipping_charge", number()),
        ("adjustment", number()),
        ("write_off_amount", number()),
        ("exchange_rate", number()),
    ])
}

pub fn contacts() -> JsonSchema {
    properties(vec![
        ("contact_id", string()),
        ("contact_name", string()),
        ("customer_name", string()),
        ("vendor_name", string()),
        ("company_name", string()),
        ("website", string()),
        ("language_code", string()),
        ("language_code_formatted", string()),
        ("contact_type", string()),
        ("contact_type_formatted", string()),
        ("status", string()),
        ("customer_sub_type", string()),
        ("source", string()),
        ("is_linked_with_zohocrm", boolean()),
        ("payment_terms", integer()),
        ("payment_terms_label", string()),
        ("currency_id", string()),
        ("twitter", string()),
        ("facebook", string()),
        ("currency_code", string()),
        ("outstanding_receivable_amount", number()),
        ("outstanding_receivable_amount_bcy", number()),
        ("outstanding_payable_amount", number()),
        ("outstanding_payable_amount_bcy", number()),
        ("unused_credits_receivable_amount", number()),
        ("unused_credits_receivable_amount_bcy", number()),
        ("unused_credits_payable_amount", number()),
        ("unused_credits_payable_amount_bcy", number()),
        ("first_name", string()),
        ("last_name", string()),
        ("email", string()),
        ("phone", string()),
        ("mobile", string()),
        ("portal_status", string()),
        ("track_1099", boolean()),
        ("created_time", date_time()),
        ("created_time_formatted", date_time()),
        ("last_modified_time", string()),
        ("last_modified_time_formatted", string()),
        ("custom_fields", custom(&[ARRAY, STRING])),
        ("custom_field_hash", custom(&[ARRAY, OBJECT])),
        ("ach_supported", boolean()),
        ("has_attachment", boolean()),
    ])
}

pub fn bills() -> JsonSchema {
    properties(vec![
        ("bill_id", string()),
        ("vendor_id", string()),
        ("vendor_name", string()),
        ("status", string()),
        ("bill_number", string()),
        ("reference_number", string()),
        ("date", date()),
        ("due_date", date()),
        ("due_days", string()),
        ("currency_id", string()),
        ("currency_code", string()),
        ("price_precision", custom(&[NUMBER, STRING])),
        ("exchange_rate", number()),
        ("total", number()),
        ("balance", number()),
        ("created_time", date_time()),
        ("last_modified_time", date_time()),
        ("attachment_name", string()),
        ("has_attachment", boolean()),
        ("is_tds_applied", boolean()),
        ("is_abn_quoted", string()),
    ])
}

pub fn sales_orders() -> JsonSchema {
    properties(vec![
        ("salesorder_id", string()),
        ("documents", custom(&[ARRAY, STRING])),
        ("shipment_days", string()),
        ("due_by_days", string()),
        ("due_in_days", string()),
        ("paid_status", string()),
        ("is_pre_gst", boolean()),
        ("gst_no", string()),
        ("total_invoiced_amount", number()),
        ("gst_treatment", string()),
        ("place_of_supply", string()),
        ("vat_treatment", string()),
        ("tax_treatment", string()),
        ("zcrm_potential_id", string()),
        ("zcrm_potential_name", string()),
        ("salesorder_number", string()),
        ("date", date()),
        ("delivery_date", date()),
        ("status", string()),
        ("shipment_date", string()),
        ("company_name", string()),
        ("reference_number", string()),
        ("customer_id", string()),
        ("customer_name", string()),
        ("contact_persons", custom(&[ARRAY, STRING])),
        ("currency_id", string()),
        ("currency_code", string()),
        ("currency_symbol", string()),
        ("exchange_rate", number()),
        ("discount_amount", number()),
        ("discount", number()),
        ("discount_applied_on_amount", number()),
        ("is_discount_before_tax", boolean()),
        ("discount_type", string()),
        ("estimate_id", string()),
        ("order_status", string()),
        ("email", string()),
        ("delivery_method", string()),
        ("delivery_method_id", string()),
        ("is_inclusive_tax", boolean()),
        ("shipping_charge", number()),
        ("adjustment", number()),
        ("adjustment_description", string()),
        ("sub_total", number()),
        ("tax_total", number()),
        ("total", number()),
        ("bcy_total", number()),
        ("taxes", custom(&[ARRAY, STRING])),
        ("price_precision", custom(&[NUMBER, STRING])),
        ("is_emailed", boolean()),
        ("billing_address", custom(&[OBJECT, STRING])),
        ("shipping_address", custom(&[OBJECT, STRING])),
        ("notes", string()),
        ("terms", string()),
        ("custom_fields", custom(&[ARRAY, STRING])),
        ("template_id", string()),
        ("template_name", string()),
        ("page_width", string()),
        ("page_height", string()),
        ("orientation", string()),
        ("template_type", string()),
        ("created_time", date_time()),
        ("last_modified_time", date_time()),
        ("created_by_id", string()),
        ("attachment_name", string()),
        ("can_send_in_mail", boolean()),
        ("salesperson_id", string()),
        ("salesperson_name", string()),
        ("merchant_id", string()),
        ("merchant_name", string()),
    ])
}

pub fn sales_orders_details() -> JsonSchema {
    properties(vec![
        ("salesorder_id", string()),
        ("documents", custom(&[ARRAY, STRING])),
        ("line_items", custom(&[ARRAY, STRING])),
        ("shipment_days", string()),
        ("due_by_days", string()),
        ("due_in_days", string()),
        ("paid_status", string()),
        ("is_pre_gst", boolean()),
        ("gst_no", string()),
        ("total_invoiced_amount", number()),
        ("gst_treatment", string()),
        ("place_of_supply", string()),
        ("vat_treatment", string()),
        ("tax_treatment", string()),
        ("zcrm_potential_id", string()),
        ("zcrm_potential_name", string()),
        ("salesorder_number", string()),
        ("date", date()),
        ("delivery_date", date()),
        ("status", string()),
        ("shipment_date", string()),
        ("company_name", string()),
        ("reference_number", string()),
        ("customer_id", string()),
        ("customer_name", string()),
        ("contact_persons", custom(&[ARRAY, STRING])),
        ("currency_id", string()),
        ("currency_code", string()),
        ("currency_symbol", string()),
        ("exchange_rate", number()),
        ("discount_amount", number()),
        ("discount", number()),
        ("discount_applied_on_amount", number()),
        ("is_discount_before_tax", boolean()),
        ("discount_type", string()),
        ("estimate_id", string()),
        ("order_status", string()),
        ("email", string()),
        ("delivery_method", string()),
        ("delivery_method_id", string()),
        ("is_inclusive_tax", boolean()),
        ("shipping_charge", number()),
        ("adjustment", number()),
        ("adjustment_description", string()),
        ("sub_total", number()),
        ("tax_total", number()),
        ("total", number()),
        ("bcy_total", number()),
        ("taxes", custom(&[ARRAY, STRING])),
        ("price_precision", custom(&[NUMBER, STRING])),
        ("is_emailed", boolean()),
        ("billing_address", custom(&[OBJECT, STRING])),
        ("shipping_address", custom(&[OBJECT, STRING])),
        ("notes", string()),
        ("terms", string()),
        ("custom_fields", custom(&[ARRAY, STRING])),
        ("template_id", string()),
        ("template_name", string()),
        ("page_width", string()),
        ("page_height", string()),
        ("orientation", string()),
        ("template_type", string()),
        ("created_time", date_time()),
        ("last_modified_time", date_time()),
        ("created_by_id", string()),
        ("attachment_name", string()),
        ("can_send_in_mail", boolean()),
        ("has_attachment", boolean()),
        ("salesperson_id", string()),
        ("salesperson_name", string()),
        ("merchant_id", string()),
        ("merchant_name", string()),
    ])
}

pub fn purchase_orders() -> JsonSchema {
    properties(vec![
        ("purchaseorder_id", string()),
        ("documents", custom(&[ARRAY, STRING])),
        ("vat_treatment", string()),
        ("gst_no", string()),
        ("gst_treatment", string()),
        ("tax_treatment", string()),
        ("is_pre_gst", boolean()),
        ("source_of_supply", string()),
        ("destination_of_supply", string()),
        ("place_of_supply", string()),
        ("pricebook_id", number()),
        ("pricebook_name", string()),
        ("is_reverse_charge_applied", boolean()),
        ("purchaseorder_number", string()),
        ("date", date()),
        ("expected_delivery_date", string()),
        ("discount", string()),
        ("discount_account_id", string()),
        ("is_discount_before_tax", boolean()),
        ("reference_number", string()),
        ("status", string()),
        ("vendor_id", string()),
        ("vendor_name", string()),
        ("crm_owner_id", string()),
        ("contact_persons", custom(&[ARRAY, STRING])),
        ("currency_id", string()),
        ("currency_code", string()),
        ("currency_symbol", string()),
        ("exchange_rate", number()),
        ("delivery_date", date()),
        ("is_emailed", boolean()),
        ("is_inclusive_tax", boolean()),
        ("sub_total", number()),
        ("tax_total", number()),
        ("total", number()),
        ("taxes", custom(&[ARRAY, STRING])),
        ("acquisition_vat_summary", custom(&[ARRAY, STRING])),
        ("reverse_charge_vat_summary", custom(&[ARRAY, STRING])),
        ("acquisition_vat_total", number()),
        ("reverse_charge_vat_total", number()),
        ("billing_address", custom(&[OBJECT, STRING])),
        ("notes", string()),
        ("terms", string()),
        ("ship_via", string()),
        ("ship_via_id", string()),
        ("attention", string()),
        ("delivery_org_address_id", string()),
        ("delivery_customer_id", string()),
        ("delivery_address", custom(&[OBJECT, STRING])),
        ("price_precision", custom(&[NUMBER, STRING])),
        ("custom_fields", custom(&[ARRAY, STRING])),
        ("attachment_name", string()),
        ("can_send_in_mail", boolean()),
        ("template_id", string()),
        ("template_name", string()),
        ("page_width", string()),
        ("page_height", string()),
        ("orientation", string()),
        ("template_type", string()),
        ("created_time", date_time()),
        ("created_by_id", string()),
        ("last_modified_time", date_time()),
        ("can_mark_as_bill", boolean()),
        ("can_mark_as_unbill", boolean()),
    ])
}

pub fn purchase_orders_details() -> JsonSchema {
    properties(vec![
        ("purchaseorder_id", string()),
        ("documents", custom(&[ARRAY, STRING])),
        ("line_items", custom(&[ARRAY, STRING])),
        ("vat_treatment", string()),
        ("gst_no", string()),
        ("gst_treatment", string()),
        ("color_code", string()),
        ("order_status", string()),
        ("current_sub_status_id", string()),
        ("current_sub_status", string()),
        ("pickup_location_id", string()),
        ("source", string()),
        ("tax_treatment", string()),
        ("is_pre_gst", boolean()),
        ("source_of_supply", string()),
        ("destination_of_supply", string()),
        ("place_of_supply", string()),
        ("pricebook_id", number()),
        ("pricebook_name", string()),
        ("is_reverse_charge_applied", boolean()),
        ("purchaseorder_number", string()),
        ("date", date()),
        ("expected_delivery_date", string()),
        ("discount", string()),
        ("discount_account_id", string()),
        ("is_discount_before_tax", boolean()),
        ("reference_number", string()),
        ("status", string()),
        ("vendor_id", string()),
        ("vendor_name", string()),
        ("crm_owner_id", string()),
        ("contact_persons", custom(&[ARRAY, STRING])),
        ("currency_id", string()),
        ("currency_code", string()),
        ("currency_symbol", string()),
        ("exchange_rate", number()),
        ("delivery_date", date()),
        ("is_emailed", boolean()),
        ("is_inclusive_tax", boolean()),
        ("sub_total", number()),
        ("tax_total", number()),
        ("total_invoiced_amount", number()),
        ("total", number()),
        ("taxes", custom(&[ARRAY, STRING])),
        ("acquisition_vat_summary", custom(&[ARRAY, STRING])),
        ("reverse_charge_vat_summary", custom(&[ARRAY, STRING])),
        ("acquisition_vat_total", number()),
        ("reverse_charge_vat_total", number()),
        ("billing_address", custom(&[OBJECT, STRING])),
        ("notes", string()),
        ("terms", string()),
        ("ship_via", string()),
        ("ship_via_id", string()),
        ("attention", string()),
        ("delivery_org_address_id", string()),
        ("delivery_customer_id", string()),
        ("delivery_address", custom(&[OBJECT, STRING])),
        ("price_precision", custom(&[NUMBER, STRING])),
        ("custom_fields", custom(&[ARRAY, STRING])),
        ("attachment_name", string()),
        ("can_send_in_mail", boolean()),
        ("template_id", string()),
        ("template_name", string()),
        ("page_width", string()),
        ("page_height", string()),
        ("orientation", string()),
        ("template_type", string()),
        ("created_time", date_time()),
        ("created_by_id", string()),
        ("last_modified_time", date_time()),
        ("can_mark_as_bill", boolean()),
        ("can_mark_as_unbill", boolean()),
    ])
}

pub fn vendors() -> JsonSchema {
    properties(vec![
        ("contact_id", string()),
        ("vendor_id", string()),
        ("contact_name", string()),
        ("vendor_name", string()),
        ("company_name", string()),
        ("website", string()),
        ("language_code", string()),
        ("language_code_formatted", string()),
        ("contact_type", string()),
        ("contact_type_formatted", string()),
        ("status", string()),
        ("customer_sub_type", string()),
        ("source", string()),
        ("is_linked_with_zohocrm", boolean()),
        ("payment_terms", integer()),
        ("payment_terms_label", string()),
        ("currency_id", string()),
        ("twitter", string()),
        ("facebook", string()),
        ("currency_code", string()),
        ("outstanding_payable_amount", number()),
        ("outstanding_payable_amount_bcy", number()),
        ("unused_credits_payable_amount", number()),
        ("unused_credits_payable_amount_bcy", number()),
        ("first_name", string()),
        ("last_name", string()),
        ("email", string()),
        ("phone", string()),
        ("mobile", string()),
        ("portal_status", string()),
        ("created_time", date_time()),
        ("created_time_formatted", date_time()),
        ("last_modified_time", date_time()),
        ("last_modified_time_formatted", date_time()),
        ("custom_fields", array(custom(&[OBJECT, STRING]))),
        ("custom_field_hash", custom(&[OBJECT, STRING])),
        ("ach_supported", boolean()),
        ("has_attachment", boolean()),
    ])
}

/// Report payloads vary with the organization's account tree, so rows are
/// passed through without a fixed property list.
pub fn profit_and_loss() -> JsonSchema {
    JsonSchema {
        additional_properties: Some(true),
        ..JsonSchema::new()
    }
}
