#[cfg(test)]
mod common;


#[cfg(test)]
mod navigation_tests;

#[cfg(test)]
mod patient_tests;

#[cfg(test)]
mod leave_tests;

#[cfg(test)]
mod equipment_tests;

#[cfg(test)]
mod maintenance_tests;

#[cfg(test)]
mod staff_tests;

#[cfg(test)]
mod records_tests;
