use itertools::Itertools;

use super::DataState;
use crate::environment::types::{CityName, Offer};

pub fn current_city_name(state: &DataState) -> CityName {
    state.current_city
}

pub fn offers_error(state: &DataState) -> bool {
    state.offers_error
}

pub fn favorite_offers(state: &DataState) -> &im::Vector<Offer> {
    &state.favorite_offers
}

pub fn favorite_count(state: &DataState) -> usize {
    state.favorite_offers.iter().filter(|o| o.is_favorite).count()
}

/// Offers of the selected city, in server order
pub fn current_city_offers(state: &DataState) -> im::Vector<Offer> {
    offers_in(&state.offers, state.current_city)
}

fn offers_in(offers: &im::Vector<Offer>, city: CityName) -> im::Vector<Offer> {
    offers
        .iter()
        .filter(|o| o.city.name == city.name())
        .cloned()
        .collect()
}

/// Favorites grouped by city for the favorites page. Cities keep the
/// order in which they first appear.
pub fn favorites_by_city(state: &DataState) -> Vec<(String, Vec<Offer>)> {
    let favorites: Vec<&Offer> = state
        .favorite_offers
        .iter()
        .filter(|o| o.is_favorite)
        .collect();
    favorites
        .iter()
        .map(|o| o.city.name.clone())
        .unique()
        .map(|name| {
            let offers = favorites
                .iter()
                .filter(|o| o.city.name == name)
                .map(|o| (*o).clone())
                .collect();
            (name, offers)
        })
        .collect()
}

/// Remembers the last result of `current_city_offers` and only filters
/// again if the offers or the city changed.
#[derive(Default, Clone, Debug)]
pub struct CurrentCityOffers {
    cached: Option<(im::Vector<Offer>, CityName, im::Vector<Offer>)>,
}

impl CurrentCityOffers {
    pub fn select(&mut self, state: &DataState) -> im::Vector<Offer> {
        if let Some((offers, city, result)) = self.cached.as_ref() {
            if offers.ptr_eq(&state.offers) && *city == state.current_city {
                return result.clone();
            }
        }
        let result = current_city_offers(state);
        self.cached = Some((state.offers.clone(), state.current_city, result.clone()));
        result
    }

    pub fn is_cached_for(&self, state: &DataState) -> bool {
        self.cached
            .as_ref()
            .map(|(offers, city, _)| offers.ptr_eq(&state.offers) && *city == state.current_city)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::mock::make_offer;

    fn ten_offers() -> DataState {
        let cities = [
            CityName::Paris,
            CityName::Amsterdam,
            CityName::Paris,
            CityName::Cologne,
            CityName::Hamburg,
            CityName::Paris,
            CityName::Brussels,
            CityName::Dusseldorf,
            CityName::Paris,
            CityName::Amsterdam,
        ];
        DataState {
            offers: cities
                .iter()
                .enumerate()
                .map(|(i, city)| make_offer(&i.to_string(), *city, 100))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn filters_by_current_city_in_order() {
        let state = ten_offers();
        let ids: Vec<_> = current_city_offers(&state)
            .iter()
            .map(|o| o.id.clone())
            .collect();
        assert_eq!(ids, vec!["0", "2", "5", "8"]);
    }

    #[test]
    fn empty_for_cities_without_offers() {
        let mut state = ten_offers();
        state.offers.retain(|o| o.city.name != "Hamburg");
        state.current_city = CityName::Hamburg;
        assert!(current_city_offers(&state).is_empty());
    }

    #[test]
    fn memoized_until_inputs_change() {
        let mut state = ten_offers();
        let mut selector = CurrentCityOffers::default();
        assert_eq!(selector.select(&state).len(), 4);
        assert!(selector.is_cached_for(&state));

        state.current_city = CityName::Amsterdam;
        assert!(!selector.is_cached_for(&state));
        assert_eq!(selector.select(&state).len(), 2);

        state.offers.push_back(make_offer("10", CityName::Amsterdam, 1));
        assert!(!selector.is_cached_for(&state));
        assert_eq!(selector.select(&state).len(), 3);
    }

    #[test]
    fn groups_favorites_by_city() {
        let mut state = DataState::default();
        for (id, city) in [
            ("1", CityName::Amsterdam),
            ("2", CityName::Paris),
            ("3", CityName::Amsterdam),
        ] {
            let mut offer = make_offer(id, city, 10);
            offer.is_favorite = true;
            state.favorite_offers.push_back(offer);
        }
        let mut removed = make_offer("4", CityName::Paris, 10);
        removed.is_favorite = false;
        state.favorite_offers.push_back(removed);

        let groups = favorites_by_city(&state);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Amsterdam");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1.len(), 1);
        assert_eq!(favorite_count(&state), 3);
    }
}
