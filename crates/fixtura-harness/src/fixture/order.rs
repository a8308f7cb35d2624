//! ---
//! fx_section: "11-harness"
//! fx_subsection: "02-fixtures"
//! fx_type: "source"
//! fx_scope: "code"
//! fx_description: "Order integration stub: a draft order sent to a receiving system."
//! fx_version: "v0.1.0"
//! fx_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use super::{ActionSpec, AttributeSpec, Fixture, FixtureCatalog, FixtureKind};
use crate::error::Result;
use crate::scenario::Action;
use crate::value::Value;

pub(super) static CATALOG: FixtureCatalog = FixtureCatalog {
    kind: FixtureKind::OrderIntegration,
    actions: &[
        ActionSpec {
            name: "set_order_id",
            required: &["order_id"],
            summary: "Set the draft order identifier",
        },
        ActionSpec {
            name: "set_amount",
            required: &["amount"],
            summary: "Set the draft order amount",
        },
        ActionSpec {
            name: "set_customer_email",
            required: &["email"],
            summary: "Set the customer email of the draft order",
        },
        ActionSpec {
            name: "set_items",
            required: &["items"],
            summary: "Replace the draft line items",
        },
        ActionSpec {
            name: "add_item",
            required: &["item"],
            summary: "Append one line item to the draft",
        },
        ActionSpec {
            name: "send_order",
            required: &[],
            summary: "Send the draft to the receiving system",
        },
    ],
    attributes: &[
        AttributeSpec {
            name: "status",
            summary: "Integration status (empty until sent)",
        },
        AttributeSpec {
            name: "order_id",
            summary: "Received order identifier",
        },
        AttributeSpec {
            name: "amount",
            summary: "Received amount",
        },
        AttributeSpec {
            name: "customer_email",
            summary: "Received customer email",
        },
        AttributeSpec {
            name: "items",
            summary: "Received line items, in order",
        },
        AttributeSpec {
            name: "items_joined",
            summary: "Received line items joined with \", \"",
        },
        AttributeSpec {
            name: "item_count",
            summary: "Number of received line items",
        },
        AttributeSpec {
            name: "sent_count",
            summary: "Number of send_order calls",
        },
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Success,
    InvalidOrderId,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Success => "SUCCESS",
            OrderStatus::InvalidOrderId => "INVALID_ORDER_ID",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Order {
    order_id: String,
    amount: f64,
    customer_email: String,
    items: Vec<String>,
}

/// Order built on the sending side and the copy the receiving side holds
/// after `send_order`.
#[derive(Debug, Default)]
pub struct OrderIntegrationFixture {
    draft: Order,
    received: Order,
    status: Option<OrderStatus>,
    sent_count: usize,
}

impl OrderIntegrationFixture {
    /// Orders without items, with a non-positive amount or without an id are
    /// rejected by the receiving system.
    fn integrate(order: &Order) -> OrderStatus {
        if order.order_id.trim().is_empty() || order.items.is_empty() || order.amount <= 0.0 {
            OrderStatus::InvalidOrderId
        } else {
            OrderStatus::Success
        }
    }
}

impl Fixture for OrderIntegrationFixture {
    fn kind(&self) -> FixtureKind {
        FixtureKind::OrderIntegration
    }

    fn apply(&mut self, action: &Action) -> Result<()> {
        match action.name.as_str() {
            "set_order_id" => self.draft.order_id = action.text("order_id")?.to_owned(),
            "set_amount" => self.draft.amount = action.number("amount")?,
            "set_customer_email" => self.draft.customer_email = action.text("email")?.to_owned(),
            "set_items" => self.draft.items = action.text_list("items")?,
            "add_item" => self.draft.items.push(action.text("item")?.to_owned()),
            "send_order" => {
                self.status = Some(Self::integrate(&self.draft));
                self.received = self.draft.clone();
                self.sent_count += 1;
            }
            other => return Err(CATALOG.unknown_action(other)),
        }
        Ok(())
    }

    fn attribute(&self, name: &str) -> Result<Value> {
        let value = match name {
            "status" => Value::from(self.status.map(|s| s.as_str()).unwrap_or_default()),
            "order_id" => Value::from(self.received.order_id.as_str()),
            "amount" => Value::Float(self.received.amount),
            "customer_email" => Value::from(self.received.customer_email.as_str()),
            "items" => Value::from(self.received.items.clone()),
            "items_joined" => Value::from(self.received.items.join(", ")),
            "item_count" => Value::from(self.received.items.len()),
            "sent_count" => Value::from(self.sent_count),
            other => return Err(CATALOG.unknown_attribute(other)),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(fixture: &mut OrderIntegrationFixture, action: Action) {
        fixture.apply(&action).unwrap();
    }

    #[test]
    fn valid_order_is_integrated() {
        let mut fixture = OrderIntegrationFixture::default();
        apply(&mut fixture, Action::new("set_order_id").with("order_id", "TEST-123"));
        apply(&mut fixture, Action::new("set_amount").with("amount", 1500.0));
        apply(&mut fixture, Action::new("set_items").with("items", vec!["Item1", "Item2"]));
        apply(&mut fixture, Action::new("send_order"));

        assert_eq!(fixture.attribute("status").unwrap(), Value::from("SUCCESS"));
        assert_eq!(
            fixture.attribute("items_joined").unwrap(),
            Value::from("Item1, Item2")
        );
        assert_eq!(fixture.attribute("item_count").unwrap(), Value::Int(2));
    }

    #[test]
    fn empty_items_map_to_invalid_order_id() {
        let mut fixture = OrderIntegrationFixture::default();
        apply(&mut fixture, Action::new("set_order_id").with("order_id", "INVALID-ORDER-ID"));
        apply(&mut fixture, Action::new("set_amount").with("amount", 0.0));
        apply(&mut fixture, Action::new("set_items").with("items", Vec::<String>::new()));
        apply(&mut fixture, Action::new("send_order"));

        assert_eq!(
            fixture.attribute("status").unwrap(),
            Value::from("INVALID_ORDER_ID")
        );
        assert_eq!(fixture.attribute("items").unwrap(), Value::List(Vec::new()));
    }

    #[test]
    fn draft_changes_after_sending_are_not_received() {
        let mut fixture = OrderIntegrationFixture::default();
        apply(&mut fixture, Action::new("add_item").with("item", "Item1"));
        apply(&mut fixture, Action::new("send_order"));
        apply(&mut fixture, Action::new("add_item").with("item", "Item2"));

        assert_eq!(fixture.attribute("items").unwrap(), Value::from(vec!["Item1"]));
        assert_eq!(fixture.attribute("sent_count").unwrap(), Value::Int(1));
    }

    #[test]
    fn unknown_action_and_attribute_are_rejected() {
        let mut fixture = OrderIntegrationFixture::default();
        assert!(fixture.apply(&Action::new("cancel_order")).is_err());
        assert!(fixture.attribute("shipping_address").is_err());
    }
}
