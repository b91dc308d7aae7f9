//! Order status transition table

use uuid::Uuid;

use crate::domain::entities::order::OrderStatus;
use crate::domain::entities::user::Role;
use crate::domain::value_objects::Caller;
use crate::repositories::OrderFilter;

use OrderStatus::{Accepted, Assigned, Cancelled, Delivered, OnTheWay, Pending};

/// Which orders a caller may act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Any,
    OwningClient,
    OwningMerchant,
    AssignedDriver,
}

impl Scope {
    /// Narrow `filter` to the orders this scope grants `caller`
    pub fn restrict(self, filter: OrderFilter, caller: Uuid) -> OrderFilter {
        match self {
            Scope::Any => filter,
            Scope::OwningClient => filter.with_client(caller),
            Scope::OwningMerchant => filter.with_merchant(caller),
            Scope::AssignedDriver => filter.with_livreur(caller),
        }
    }
}

/// A role may move an order into `to` from any of `from`, within `scope`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub role: Role,
    pub to: OrderStatus,
    pub from: &'static [OrderStatus],
    pub scope: Scope,
}

impl TransitionRule {
    /// The precondition for applying this rule to one order
    pub fn filter(&self, order_id: Uuid, caller: &Caller) -> OrderFilter {
        let filter = OrderFilter::by_id(order_id).with_statuses(self.from);
        self.scope.restrict(filter, caller.user_id)
    }
}

/// Every permitted status change. ASSIGNED is only reached through assignment.
pub const TRANSITIONS: &[TransitionRule] = &[
    TransitionRule { role: Role::Admin, to: Accepted, from: &[Pending], scope: Scope::Any },
    TransitionRule { role: Role::Admin, to: OnTheWay, from: &[Assigned], scope: Scope::Any },
    TransitionRule { role: Role::Admin, to: Delivered, from: &[OnTheWay], scope: Scope::Any },
    TransitionRule {
        role: Role::Admin,
        to: Cancelled,
        from: &[Pending, Accepted, Assigned, OnTheWay],
        scope: Scope::Any,
    },
    TransitionRule {
        role: Role::Commercant,
        to: Accepted,
        from: &[Pending],
        scope: Scope::OwningMerchant,
    },
    TransitionRule {
        role: Role::Commercant,
        to: OnTheWay,
        from: &[Assigned],
        scope: Scope::OwningMerchant,
    },
    TransitionRule {
        role: Role::Commercant,
        to: Cancelled,
        from: &[Pending, Accepted],
        scope: Scope::OwningMerchant,
    },
    TransitionRule {
        role: Role::Livreur,
        to: OnTheWay,
        from: &[Assigned],
        scope: Scope::AssignedDriver,
    },
    TransitionRule {
        role: Role::Livreur,
        to: Delivered,
        from: &[OnTheWay],
        scope: Scope::AssignedDriver,
    },
    TransitionRule {
        role: Role::Client,
        to: Cancelled,
        from: &[Pending],
        scope: Scope::OwningClient,
    },
];

/// Look up the rule letting `role` move an order into `to`
pub fn rule_for(role: Role, to: OrderStatus) -> Option<&'static TransitionRule> {
    TRANSITIONS
        .iter()
        .find(|rule| rule.role == role && rule.to == to)
}
