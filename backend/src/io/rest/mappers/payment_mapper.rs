use shared::Payment as PaymentDto;

use crate::domain::models::payment::Payment;

pub struct PaymentMapper;

impl PaymentMapper {
    pub fn to_dto(payment: Payment) -> PaymentDto {
        PaymentDto {
            id: payment.id,
            reservation_id: payment.reservation_id,
            amount: payment.amount,
            payment_type: payment.payment_type,
            payment_method: payment.payment_method,
            payment_date: payment.payment_date,
            reference_number: payment.reference_number,
            notes: payment.notes,
            created_at: payment.created_at,
        }
    }
}
