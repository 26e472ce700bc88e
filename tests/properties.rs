use floor_u_value::core::floor_layer::{BridgingSpec, FloorLayerInput, FloorLayerSpec};
use floor_u_value::core::floor_types::custom::CustomFloorInput;
use floor_u_value::core::floor_types::exposed::{ExposedFloorInput, ExposedTo};
use floor_u_value::core::floor_types::heated_basement::HeatedBasementFloorInput;
use floor_u_value::core::floor_types::solid::{EdgeInsulation, SolidFloorInput};
use floor_u_value::core::floor_types::suspended::SuspendedFloorInput;
use floor_u_value::core::floor_types::{
    construct_floor_u_value_model, CommonInput, FloorUValueModelInput, PerFloorTypeInput,
};
use floor_u_value::core::insulation::{InsulationInput, InsulationMaterial};
use floor_u_value::core::proportion::Proportion;
use floor_u_value::core::warnings::{Warning, WarningPath};
use proptest::prelude::*;

fn material() -> impl Strategy<Value = InsulationMaterial> {
    prop_oneof![
        (0.0..2.0f64).prop_map(|conductivity| InsulationMaterial::conductivity("c", conductivity)),
        (0.0..10.0f64).prop_map(|resistance| InsulationMaterial::resistance("r", resistance)),
    ]
}

fn resistance_material() -> impl Strategy<Value = InsulationMaterial> {
    (0.0..10.0f64).prop_map(|resistance| InsulationMaterial::resistance("r", resistance))
}

fn insulation() -> impl Strategy<Value = Option<InsulationInput>> {
    prop::option::of(prop_oneof![
        (0.0..2.0f64, 0.0..0.5f64).prop_map(|(conductivity, thickness)| {
            InsulationInput::Conductivity {
                conductivity,
                thickness,
            }
        }),
        (0.0..10.0f64).prop_map(|resistance| InsulationInput::Resistance { resistance }),
    ])
}

fn floor_layer() -> impl Strategy<Value = FloorLayerInput> {
    (
        material(),
        prop::option::of((material(), 0.0..=1.0f64)),
        0.0..0.5f64,
    )
        .prop_filter_map("layer must validate", |(main, bridging, thickness)| {
            let spec = FloorLayerSpec {
                thickness: Some(thickness),
                main_material: Some(main),
                bridging: match bridging {
                    Some((material, ratio)) => BridgingSpec {
                        material: Some(material),
                        proportion: Proportion::from_ratio(ratio).ok(),
                    },
                    None => BridgingSpec::default(),
                },
                ..Default::default()
            };
            FloorLayerInput::validate(&spec).inner().clone().ok()
        })
}

fn layers() -> impl Strategy<Value = Vec<FloorLayerInput>> {
    prop::collection::vec(floor_layer(), 0..4)
}

fn exposed_to() -> impl Strategy<Value = ExposedTo> {
    prop_oneof![Just(ExposedTo::OutsideAir), Just(ExposedTo::UnheatedSpace)]
}

fn edge_insulation() -> impl Strategy<Value = EdgeInsulation> {
    let insulation =
        (0.0..5.0f64).prop_map(|resistance| InsulationInput::Resistance { resistance });
    prop_oneof![
        Just(EdgeInsulation::None),
        (insulation.clone(), 0.0..3.0f64)
            .prop_map(|(insulation, width)| EdgeInsulation::Horizontal { insulation, width }),
        (insulation, 0.0..3.0f64)
            .prop_map(|(insulation, depth)| EdgeInsulation::Vertical { insulation, depth }),
    ]
}

fn per_floor_type() -> impl Strategy<Value = PerFloorTypeInput> {
    prop_oneof![
        (0.0..5.0f64).prop_map(|u_value| PerFloorTypeInput::Custom(CustomFloorInput { u_value })),
        (insulation(), edge_insulation()).prop_map(|(all_over_insulation, edge_insulation)| {
            PerFloorTypeInput::Solid(SolidFloorInput {
                all_over_insulation,
                edge_insulation,
            })
        }),
        (0.0..1.0f64, 0.0..100.0f64, layers()).prop_map(
            |(ventilation_combined_area, under_floor_space_perimeter, insulation_layers)| {
                PerFloorTypeInput::Suspended(SuspendedFloorInput {
                    ventilation_combined_area,
                    under_floor_space_perimeter,
                    insulation_layers,
                })
            }
        ),
        (0.0..5.0f64, insulation()).prop_map(|(depth, insulation)| {
            PerFloorTypeInput::HeatedBasement(HeatedBasementFloorInput { depth, insulation })
        }),
        (exposed_to(), layers()).prop_map(|(exposed_to, layers)| {
            PerFloorTypeInput::Exposed(ExposedFloorInput { exposed_to, layers })
        }),
    ]
}

fn common() -> impl Strategy<Value = CommonInput> {
    (0.0..500.0f64, 0.0..200.0f64)
        .prop_map(|(area, exposed_perimeter)| CommonInput::new(area, exposed_perimeter))
}

proptest! {
    #[test]
    fn u_value_is_always_finite(common in common(), per_floor_type in per_floor_type()) {
        let model = construct_floor_u_value_model(FloorUValueModelInput { common, per_floor_type });
        prop_assert!(model.u_value().inner().is_finite());
    }

    #[test]
    fn repeated_reads_give_identical_results(common in common(), per_floor_type in per_floor_type()) {
        let model = construct_floor_u_value_model(FloorUValueModelInput { common, per_floor_type });
        let first = model.u_value().clone();
        let second = model.u_value();
        prop_assert_eq!(first.inner().to_bits(), second.inner().to_bits());
        prop_assert_eq!(first.warnings(), second.warnings());
    }

    #[test]
    fn warnings_are_never_repeated(common in common(), per_floor_type in per_floor_type()) {
        let model = construct_floor_u_value_model(FloorUValueModelInput { common, per_floor_type });
        let warnings = model.u_value().warnings().iter().collect::<Vec<_>>();
        for (index, warning) in warnings.iter().enumerate() {
            prop_assert!(!warnings[index + 1..].contains(warning), "repeated warning {:?}", warning);
        }
    }

    #[test]
    fn exposed_floor_does_not_depend_on_area(
        exposed_to in exposed_to(),
        layers in layers(),
        first_area in 0.1..500.0f64,
        second_area in 0.1..500.0f64,
        exposed_perimeter in 0.0..200.0f64,
    ) {
        let u_value = |area: f64| {
            let model = construct_floor_u_value_model(FloorUValueModelInput {
                common: CommonInput::new(area, exposed_perimeter),
                per_floor_type: PerFloorTypeInput::Exposed(ExposedFloorInput {
                    exposed_to,
                    layers: layers.clone(),
                }),
            });
            *model.u_value().inner()
        };
        prop_assert_eq!(u_value(first_area).to_bits(), u_value(second_area).to_bits());
    }

    #[test]
    fn conductivity_material_without_thickness_is_rejected(
        conductivity in 0.0..2.0f64,
        bridging in prop::option::of((material(), 0.0..=1.0f64)),
    ) {
        let spec = FloorLayerSpec {
            main_material: Some(InsulationMaterial::conductivity("c", conductivity)),
            bridging: bridging
                .map(|(material, ratio)| BridgingSpec {
                    material: Some(material),
                    proportion: Proportion::from_ratio(ratio).ok(),
                })
                .unwrap_or_default(),
            ..Default::default()
        };
        let error = FloorLayerInput::validate(&spec).inner().clone().unwrap_err();
        prop_assert_eq!(error.path, WarningPath::from_iter(["thickness".into()]));
    }

    #[test]
    fn resistance_materials_with_thickness_are_accepted_with_a_warning(
        main in resistance_material(),
        bridging in prop::option::of((resistance_material(), 0.0..=1.0f64)),
        thickness in 0.0..1.0f64,
    ) {
        let spec = FloorLayerSpec {
            thickness: Some(thickness),
            main_material: Some(main),
            bridging: bridging
                .map(|(material, ratio)| BridgingSpec {
                    material: Some(material),
                    proportion: Proportion::from_ratio(ratio).ok(),
                })
                .unwrap_or_default(),
            ..Default::default()
        };
        let validated = FloorLayerInput::validate(&spec);
        prop_assert!(validated.inner().is_ok());
        let expected = Warning::UnnecessaryValue {
            path: WarningPath::from_iter(["thickness".into()]),
        };
        prop_assert!(validated.warnings().contains(&expected));
    }
}
