// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::fmt::Debug;

/// Editable creation form held by a list controller while it is open.
pub trait Draft: Clone + Debug + Default {
    /// Required-field check run before the form is submitted.
    fn validate(&self) -> Result<()>;
}

/// Draft for record types that cannot be created from the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoDraft;

impl Draft for NoDraft {
    fn validate(&self) -> Result<()> {
        bail!("this page has no creation form")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFormInput {
    pub service_name: String,
    pub service_cost: String,
    pub service_description: String,
    pub service_details: String,
    pub service_image_url: String,
    pub service_type: String,
    pub rating: String,
    pub rating_count: String,
    pub remarks: String,
    pub created_by: String,
    pub updated_by: String,
    pub active: String,
}

impl Default for ServiceFormInput {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            service_cost: String::new(),
            service_description: String::new(),
            service_details: String::new(),
            service_image_url: String::new(),
            service_type: String::new(),
            rating: String::new(),
            rating_count: String::new(),
            remarks: String::new(),
            created_by: String::new(),
            updated_by: String::new(),
            active: "Y".to_owned(),
        }
    }
}

impl ServiceFormInput {
    pub const FIELDS: [&'static str; 12] = [
        "service_name",
        "service_cost",
        "service_description",
        "service_details",
        "service_image_url",
        "service_type",
        "rating",
        "rating_count",
        "remarks",
        "created_by",
        "updated_by",
        "active",
    ];

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let slot = match name {
            "service_name" => &mut self.service_name,
            "service_cost" => &mut self.service_cost,
            "service_description" => &mut self.service_description,
            "service_details" => &mut self.service_details,
            "service_image_url" => &mut self.service_image_url,
            "service_type" => &mut self.service_type,
            "rating" => &mut self.rating,
            "rating_count" => &mut self.rating_count,
            "remarks" => &mut self.remarks,
            "created_by" => &mut self.created_by,
            "updated_by" => &mut self.updated_by,
            "active" => &mut self.active,
            unknown => bail!(
                "unknown service field {unknown:?}; expected one of: {}",
                Self::FIELDS.join(", ")
            ),
        };
        *slot = value.to_owned();
        Ok(())
    }
}

impl Draft for ServiceFormInput {
    fn validate(&self) -> Result<()> {
        if self.service_name.trim().is_empty() {
            bail!("service name is required -- enter a name and retry");
        }
        if self.service_cost.trim().is_empty() {
            bail!("service cost is required -- enter a cost and retry");
        }
        let cost = self.service_cost.trim().parse::<f64>().ok();
        if !cost.is_some_and(f64::is_finite) {
            bail!(
                "service cost must be a number, got {:?}",
                self.service_cost
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Draft, NoDraft, ServiceFormInput};
    use anyhow::Result;

    #[test]
    fn blank_service_form_defaults_to_active() {
        let form = ServiceFormInput::default();
        assert_eq!(form.active, "Y");
        assert!(form.service_name.is_empty());
    }

    #[test]
    fn service_form_requires_name_and_cost() -> Result<()> {
        let mut form = ServiceFormInput::default();
        let error = form.validate().expect_err("blank form should fail");
        assert!(error.to_string().contains("service name is required"));

        form.set_field("service_name", "Deep Cleaning")?;
        let error = form.validate().expect_err("missing cost should fail");
        assert!(error.to_string().contains("service cost is required"));

        form.set_field("service_cost", "1499")?;
        form.validate()?;
        Ok(())
    }

    #[test]
    fn service_form_optional_fields_stay_optional() -> Result<()> {
        let mut form = ServiceFormInput::default();
        form.set_field("service_name", "Pest Control")?;
        form.set_field("service_cost", "899.50")?;
        assert!(form.service_description.is_empty());
        assert!(form.rating.is_empty());
        form.validate()
    }

    #[test]
    fn service_form_rejects_non_numeric_cost() -> Result<()> {
        let mut form = ServiceFormInput::default();
        form.set_field("service_name", "Painting")?;
        form.set_field("service_cost", "cheap")?;
        let error = form.validate().expect_err("non-numeric cost should fail");
        assert!(error.to_string().contains("must be a number"));
        Ok(())
    }

    #[test]
    fn service_form_rejects_non_finite_cost() -> Result<()> {
        let mut form = ServiceFormInput::default();
        form.set_field("service_name", "Painting")?;
        for cost in ["NaN", "inf", "-infinity"] {
            form.set_field("service_cost", cost)?;
            let error = form.validate().expect_err("non-finite cost should fail");
            assert!(error.to_string().contains("must be a number"), "{cost}");
        }

        form.set_field("service_cost", " 2499.50 ")?;
        form.validate()?;
        Ok(())
    }

    #[test]
    fn set_field_rejects_unknown_names() {
        let mut form = ServiceFormInput::default();
        let error = form
            .set_field("colour", "red")
            .expect_err("unknown field should fail");
        let message = error.to_string();
        assert!(message.contains("unknown service field"));
        assert!(message.contains("service_name"));
    }

    #[test]
    fn no_draft_never_validates() {
        assert!(NoDraft.validate().is_err());
    }
}
