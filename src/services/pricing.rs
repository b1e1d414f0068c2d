use crate::models::AdditionalService;

/// Total price for a booking: hourly rate prorated over the duration plus
/// any additional services, rounded to cents (ties away from zero).
///
/// Inputs are trusted to be non-negative; the request validator runs before
/// any price is computed.
pub fn total_price(base_rate: f64, duration_minutes: i64, services: &[AdditionalService]) -> f64 {
    let hours = duration_minutes as f64 / 60.0;
    let services_total: f64 = services.iter().map(|s| s.price).sum();
    round_to_cents(base_rate * hours + services_total)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(name: &str, price: f64) -> AdditionalService {
        AdditionalService {
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn test_base_rate_prorated_over_duration() {
        assert_eq!(total_price(500.0, 90, &[]), 750.0);
        assert_eq!(total_price(500.0, 60, &[]), 500.0);
        assert_eq!(total_price(500.0, 30, &[]), 250.0);
    }

    #[test]
    fn test_services_are_additive() {
        let services = [service("racket rental", 100.0)];
        assert_eq!(total_price(500.0, 90, &services), 850.0);

        let services = [service("racket rental", 100.0), service("floodlights", 50.5)];
        assert_eq!(total_price(500.0, 60, &services), 650.5);
    }

    #[test]
    fn test_rounded_to_cents() {
        // 333.33/hour for 20 minutes = 111.11
        assert_eq!(total_price(333.33, 20, &[]), 111.11);
        // half-cent rounds away from zero
        assert_eq!(total_price(0.01, 30, &[]), 0.01);
    }

    #[test]
    fn test_zero_duration_charges_services_only() {
        let services = [service("equipment", 25.0)];
        assert_eq!(total_price(500.0, 0, &services), 25.0);
    }
}
