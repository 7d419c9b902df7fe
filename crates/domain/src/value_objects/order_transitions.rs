use crate::value_objects::enums::order_statuses::OrderStatus;

/// The caller's relationship to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderActor {
    Buyer,
    Seller,
}

/// Who may perform a given transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPermission {
    BuyerOnly,
    SellerOnly,
    Either,
}

impl TransitionPermission {
    pub fn allows(&self, actor: OrderActor) -> bool {
        match self {
            TransitionPermission::BuyerOnly => actor == OrderActor::Buyer,
            TransitionPermission::SellerOnly => actor == OrderActor::Seller,
            TransitionPermission::Either => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The target status is not reachable from the current one.
    InvalidTransition,
    /// The transition exists but this actor may not perform it.
    ActorNotAllowed,
}

/// The single source of truth for the order lifecycle.
///
/// Returns the permission required for `from -> to`, or `None` when the
/// transition does not exist at all (e.g. pending -> completed).
pub fn permitted_transition(
    from: OrderStatus,
    to: OrderStatus,
) -> Option<TransitionPermission> {
    use OrderStatus::*;
    use TransitionPermission::*;

    if from.is_terminal() {
        return None;
    }

    match (from, to) {
        (Pending, Paid) => Some(BuyerOnly),
        (Paid, Delivered) => Some(SellerOnly),
        (Delivered, Completed) => Some(BuyerOnly),
        (Pending, Cancelled) | (Paid, Cancelled) | (Delivered, Cancelled) => Some(Either),
        (Paid, Refunded) | (Delivered, Refunded) => Some(SellerOnly),
        _ => None,
    }
}

pub fn check_transition(
    from: OrderStatus,
    to: OrderStatus,
    actor: OrderActor,
) -> Result<(), TransitionError> {
    let permission =
        permitted_transition(from, to).ok_or(TransitionError::InvalidTransition)?;

    if permission.allows(actor) {
        Ok(())
    } else {
        Err(TransitionError::ActorNotAllowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn happy_path_is_buyer_seller_buyer() {
        assert!(check_transition(Pending, Paid, OrderActor::Buyer).is_ok());
        assert!(check_transition(Paid, Delivered, OrderActor::Seller).is_ok());
        assert!(check_transition(Delivered, Completed, OrderActor::Buyer).is_ok());
    }

    #[test]
    fn completed_is_not_reachable_from_pending() {
        assert_eq!(
            check_transition(Pending, Completed, OrderActor::Buyer),
            Err(TransitionError::InvalidTransition)
        );
        assert_eq!(
            check_transition(Pending, Delivered, OrderActor::Seller),
            Err(TransitionError::InvalidTransition)
        );
    }

    #[test]
    fn seller_cannot_mark_paid_or_completed() {
        assert_eq!(
            check_transition(Pending, Paid, OrderActor::Seller),
            Err(TransitionError::ActorNotAllowed)
        );
        assert_eq!(
            check_transition(Delivered, Completed, OrderActor::Seller),
            Err(TransitionError::ActorNotAllowed)
        );
    }

    #[test]
    fn buyer_cannot_mark_delivered_or_refunded() {
        assert_eq!(
            check_transition(Paid, Delivered, OrderActor::Buyer),
            Err(TransitionError::ActorNotAllowed)
        );
        assert_eq!(
            check_transition(Paid, Refunded, OrderActor::Buyer),
            Err(TransitionError::ActorNotAllowed)
        );
    }

    #[test]
    fn either_party_may_cancel_before_completion() {
        for from in [Pending, Paid, Delivered] {
            assert!(check_transition(from, Cancelled, OrderActor::Buyer).is_ok());
            assert!(check_transition(from, Cancelled, OrderActor::Seller).is_ok());
        }
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for from in [Completed, Cancelled, Refunded] {
            for to in [Pending, Paid, Delivered, Completed, Cancelled, Refunded] {
                assert_eq!(
                    permitted_transition(from, to),
                    None,
                    "{} -> {} should not exist",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn refund_requires_payment_first() {
        assert_eq!(permitted_transition(Pending, Refunded), None);
        assert!(check_transition(Paid, Refunded, OrderActor::Seller).is_ok());
        assert!(check_transition(Delivered, Refunded, OrderActor::Seller).is_ok());
    }
}
