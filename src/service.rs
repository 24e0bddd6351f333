//! Order handling on top of a pack size registry and a packing strategy.

use log::{debug, info};

use crate::packs::{PackSize, Packs, Target};
use crate::registry::{PackSizeRegistry, RegistryError};
use crate::PackingStrategy;

pub struct PackService<R> {
    registry: R,
    strategy: Box<dyn PackingStrategy>,
}

impl<R: PackSizeRegistry> PackService<R> {
    pub fn new(registry: R, strategy: Box<dyn PackingStrategy>) -> Self {
        Self { registry, strategy }
    }

    pub fn strategy(&self) -> &dyn PackingStrategy {
        self.strategy.as_ref()
    }

    /// Current pack sizes, ascending.
    pub fn pack_sizes(&self) -> Result<Vec<PackSize>, RegistryError> {
        self.registry.find_all()
    }

    pub fn set_pack_sizes(&self, sizes: &[PackSize]) -> Result<(), RegistryError> {
        self.registry.replace_all(sizes)?;
        info!("pack sizes replaced with {:?}", sizes);
        Ok(())
    }

    /// Packs `amount` with the registry's current sizes.
    pub fn calculate(&self, amount: Target) -> Result<Packs, RegistryError> {
        let sizes = self.registry.find_all()?;
        debug!(
            "calculating {} with {} strategy over {:?}",
            amount,
            self.strategy.name(),
            sizes
        );
        Ok(self.strategy.compute(amount, &sizes))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::greedy::Greedy;
    use crate::optimizer::Optimizer;
    use crate::registry::InMemoryRegistry;

    /// Registry double with scripted failures that records replacements.
    #[derive(Default)]
    struct MockRegistry {
        sizes: Vec<PackSize>,
        fail_find: bool,
        fail_replace: bool,
        replaced_with: RefCell<Option<Vec<PackSize>>>,
    }

    impl PackSizeRegistry for MockRegistry {
        fn find_all(&self) -> Result<Vec<PackSize>, RegistryError> {
            if self.fail_find {
                return Err(RegistryError::Poisoned);
            }
            Ok(self.sizes.clone())
        }

        fn replace_all(&self, sizes: &[PackSize]) -> Result<(), RegistryError> {
            if self.fail_replace {
                return Err(RegistryError::Poisoned);
            }
            *self.replaced_with.borrow_mut() = Some(sizes.to_vec());
            Ok(())
        }
    }

    fn optimal(registry: MockRegistry) -> PackService<MockRegistry> {
        PackService::new(registry, Box::new(Optimizer::default()))
    }

    #[test]
    fn test_pack_sizes() {
        let service = optimal(MockRegistry {
            sizes: vec![100, 200],
            ..Default::default()
        });
        assert_eq!(service.pack_sizes().unwrap(), vec![100, 200]);
    }

    #[test]
    fn test_pack_sizes_error() {
        let service = optimal(MockRegistry {
            fail_find: true,
            ..Default::default()
        });
        assert!(service.pack_sizes().is_err());
    }

    #[test]
    fn test_set_pack_sizes_forwards_input() {
        let service = optimal(MockRegistry::default());
        service.set_pack_sizes(&[100, 200]).unwrap();
        assert_eq!(
            *service.registry.replaced_with.borrow(),
            Some(vec![100, 200])
        );
    }

    #[test]
    fn test_set_pack_sizes_error() {
        let service = optimal(MockRegistry {
            fail_replace: true,
            ..Default::default()
        });
        assert!(service.set_pack_sizes(&[100, 200]).is_err());
    }

    #[test]
    fn test_calculate_uses_registry_sizes() {
        let service = optimal(MockRegistry {
            sizes: vec![250, 500, 1000],
            ..Default::default()
        });
        assert_eq!(
            service.calculate(12_001).unwrap(),
            Packs::from([(250, 1), (1000, 12)])
        );
    }

    #[test]
    fn test_calculate_error() {
        let service = optimal(MockRegistry {
            fail_find: true,
            ..Default::default()
        });
        assert!(matches!(
            service.calculate(100),
            Err(RegistryError::Poisoned)
        ));
    }

    #[test]
    fn test_calculate_sees_replaced_sizes() {
        let service = PackService::new(InMemoryRegistry::new(), Box::new(Greedy));
        assert_eq!(service.strategy().name(), "greedy");
        assert_eq!(service.calculate(251).unwrap(), Packs::from([(250, 2)]));

        service.set_pack_sizes(&[23, 31, 53]).unwrap();
        assert_eq!(service.pack_sizes().unwrap(), vec![23, 31, 53]);
        assert_eq!(service.calculate(53).unwrap(), Packs::from([(53, 1)]));
    }
}
